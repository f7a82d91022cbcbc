//! Recursive quadrant-division maze generator.

use mazefinder_core::{CellId, CellState, Dir, Grid, Pos, Region, StepEvent, StepObserver};
use rand::Rng;

/// One arm of a division's wall cross, named by where it lies relative to
/// the crossing point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// Rotation used to pick the arm left without an opening.
    pub const CYCLE: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];
}

/// Tunables for [`MazeGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    /// Regions with fewer cells than this are left open.
    pub min_area: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self { min_area: 30 }
    }
}

/// Record of a single division step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Division {
    pub region: Region,
    /// Row of the full-width wall.
    pub divider_row: usize,
    /// Column of the full-height wall.
    pub divider_col: usize,
    /// The arm that received no opening.
    pub spared: Side,
    /// One opening per punched arm, in [`Side::CYCLE`] order.
    pub openings: Vec<(Side, Pos)>,
}

/// Everything a generation pass did, in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeReport {
    pub divisions: Vec<Division>,
}

/// Maze generator operating on a [`Grid`].
///
/// The spared-arm rotation lives on the generator, so two generators built
/// with equally seeded RNGs produce the same maze.
pub struct MazeGenerator<R: Rng> {
    pub rng: R,
    config: MazeConfig,
    spare_counter: usize,
}

impl<R: Rng> MazeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, MazeConfig::default())
    }

    pub fn with_config(rng: R, config: MazeConfig) -> Self {
        Self {
            rng,
            config,
            spare_counter: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> MazeConfig {
        self.config
    }

    /// Divide the whole grid.
    ///
    /// Opening guards left over from an earlier pass are cleared first. Walls
    /// are not; call [`Grid::reset`] for a blank slate.
    pub fn generate_full(&mut self, grid: &mut Grid, observer: &mut impl StepObserver) -> MazeReport {
        grid.clear_opening_guards();
        self.generate(grid, Region::square(grid.size()), observer)
    }

    /// Divide `region`, which is clipped to the grid. The neighbors of the
    /// start and end are never walled.
    pub fn generate(
        &mut self,
        grid: &mut Grid,
        region: Region,
        observer: &mut impl StepObserver,
    ) -> MazeReport {
        let mut report = MazeReport::default();
        let last = grid.size() - 1;
        let clipped = Region::new(
            region.top_left,
            Pos::new(region.bottom_right.row.min(last), region.bottom_right.col.min(last)),
        );
        // Endpoints stay reachable: dividers leave a gap beside them the same
        // way they do around a punched opening.
        for id in [grid.start(), grid.end()].into_iter().flatten() {
            guard_around(grid, id);
        }
        if let Some(region) = clipped {
            self.divide(grid, region, observer, &mut report);
        }
        log::info!("maze: {} divisions in {region}", report.divisions.len());
        report
    }

    fn divide(
        &mut self,
        grid: &mut Grid,
        region: Region,
        observer: &mut impl StepObserver,
        report: &mut MazeReport,
    ) {
        if region.area() < self.config.min_area || region.width() < 3 || region.height() < 3 {
            return;
        }
        let (tl, br) = (region.top_left, region.bottom_right);

        // Jitter each divider by 0 or 1 off the midpoint, keeping all four
        // arms at least one cell long.
        let col = ((tl.col + br.col) / 2 + self.rng.random_range(0..=1)).clamp(tl.col + 1, br.col - 1);
        let row = ((tl.row + br.row) / 2 + self.rng.random_range(0..=1)).clamp(tl.row + 1, br.row - 1);

        for r in tl.row..=br.row {
            self.draw_wall(grid, Pos::new(r, col), observer);
        }
        for c in tl.col..=br.col {
            self.draw_wall(grid, Pos::new(row, c), observer);
        }

        let spared = Side::CYCLE[self.spare_counter];
        self.spare_counter = (self.spare_counter + 1) % Side::CYCLE.len();

        let mut openings = Vec::with_capacity(3);
        for side in Side::CYCLE {
            if side == spared {
                continue;
            }
            let at = match side {
                Side::North => Pos::new(self.rng.random_range(tl.row..row), col),
                Side::South => Pos::new(self.rng.random_range(row + 1..=br.row), col),
                Side::West => Pos::new(row, self.rng.random_range(tl.col..col)),
                Side::East => Pos::new(row, self.rng.random_range(col + 1..=br.col)),
            };
            self.punch(grid, at, observer);
            openings.push((side, at));
        }
        log::trace!("maze: divided {region} at row {row}, col {col}, spared {spared:?}");
        report.divisions.push(Division {
            region,
            divider_row: row,
            divider_col: col,
            spared,
            openings,
        });

        let quadrants = [
            (tl, Pos::new(row - 1, col - 1)),
            (Pos::new(tl.row, col + 1), Pos::new(row - 1, br.col)),
            (Pos::new(row + 1, tl.col), Pos::new(br.row, col - 1)),
            (Pos::new(row + 1, col + 1), br),
        ];
        for (a, b) in quadrants {
            if let Some(q) = Region::new(a, b) {
                self.divide(grid, q, observer, report);
            }
        }
    }

    /// Wall a cell unless it guards an earlier opening or is an endpoint.
    fn draw_wall(&mut self, grid: &mut Grid, p: Pos, observer: &mut impl StepObserver) {
        let Some(id) = grid.id(p) else {
            return;
        };
        if grid.cell(id).opening_guard {
            return;
        }
        if grid.carve(id, false) {
            observer.on_step(StepEvent::new(p, CellState::Wall));
        }
    }

    /// Open a cell and guard its four neighbors against later dividers.
    fn punch(&mut self, grid: &mut Grid, p: Pos, observer: &mut impl StepObserver) {
        let Some(id) = grid.id(p) else {
            return;
        };
        if grid.carve(id, true) {
            observer.on_step(StepEvent::new(p, CellState::Open));
        }
        guard_around(grid, id);
    }
}

fn guard_around(grid: &mut Grid, id: CellId) {
    for dir in Dir::ALL {
        if let Some(n) = grid.neighbor(id, dir) {
            grid.cell_mut(n).opening_guard = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use mazefinder_core::{NoopObserver, Recorder};
    use mazefinder_paths::SearchEngine;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn generate(size: usize, seed: u64) -> (Grid, MazeReport) {
        let mut grid = Grid::new(size).unwrap();
        let mut mg = MazeGenerator::new(StdRng::seed_from_u64(seed));
        let report = mg.generate_full(&mut grid, &mut NoopObserver);
        (grid, report)
    }

    fn open_cells_connected(grid: &Grid) -> bool {
        let open: Vec<_> = grid.cells().filter(|(_, c)| c.passable()).map(|(id, _)| id).collect();
        let Some(&first) = open.first() else {
            return true;
        };
        let mut seen = HashSet::from([first]);
        let mut q = VecDeque::from([first]);
        while let Some(c) = q.pop_front() {
            for n in grid.neighbors(c) {
                if grid.is_passable(n) && seen.insert(n) {
                    q.push_back(n);
                }
            }
        }
        seen.len() == open.len()
    }

    #[test]
    fn small_region_is_base_case() {
        let mut grid = Grid::new(5).unwrap();
        let mut mg = MazeGenerator::new(StdRng::seed_from_u64(1));
        let report = mg.generate_full(&mut grid, &mut NoopObserver);
        assert!(report.divisions.is_empty());
        assert!(grid.cells().all(|(_, c)| c.passable()));
    }

    #[test]
    fn thin_region_is_base_case() {
        let mut grid = Grid::new(40).unwrap();
        let strip = Region::new(Pos::new(0, 0), Pos::new(39, 1)).unwrap();
        let report = MazeGenerator::new(StdRng::seed_from_u64(1)).generate(
            &mut grid,
            strip,
            &mut NoopObserver,
        );
        assert!(report.divisions.is_empty());
    }

    #[test]
    fn every_division_keeps_three_openings() {
        for size in [8, 13, 20, 31] {
            for seed in 0..10 {
                let (grid, report) = generate(size, seed);
                assert!(!report.divisions.is_empty());
                for d in &report.divisions {
                    assert_eq!(d.openings.len(), 3);
                    let sides: HashSet<Side> = d.openings.iter().map(|(s, _)| *s).collect();
                    assert_eq!(sides.len(), 3);
                    assert!(!sides.contains(&d.spared));
                    for &(side, p) in &d.openings {
                        assert!(d.region.contains(p));
                        match side {
                            Side::North => assert!(p.col == d.divider_col && p.row < d.divider_row),
                            Side::South => assert!(p.col == d.divider_col && p.row > d.divider_row),
                            Side::West => assert!(p.row == d.divider_row && p.col < d.divider_col),
                            Side::East => assert!(p.row == d.divider_row && p.col > d.divider_col),
                        }
                        assert!(grid.cell_at(p).unwrap().passable(), "sealed opening at {p}");
                    }
                }
            }
        }
    }

    #[test]
    fn dividers_sit_near_the_midpoint() {
        let (_, report) = generate(24, 5);
        for d in &report.divisions {
            let (tl, br) = (d.region.top_left, d.region.bottom_right);
            let mid_r = (tl.row + br.row) / 2;
            let mid_c = (tl.col + br.col) / 2;
            assert!(d.divider_row >= tl.row + 1 && d.divider_row < br.row);
            assert!(d.divider_col >= tl.col + 1 && d.divider_col < br.col);
            assert!(d.divider_row.abs_diff(mid_r) <= 1);
            assert!(d.divider_col.abs_diff(mid_c) <= 1);
        }
    }

    #[test]
    fn spared_arm_rotates() {
        let (_, report) = generate(30, 2);
        assert!(report.divisions.len() >= 5);
        for (i, d) in report.divisions.iter().enumerate() {
            assert_eq!(d.spared, Side::CYCLE[i % 4]);
        }
    }

    #[test]
    fn open_area_stays_connected() {
        for size in 8..40 {
            for seed in 0..4 {
                let (grid, _) = generate(size, seed);
                assert!(open_cells_connected(&grid), "size {size} seed {seed}");
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let (a, ra) = generate(25, 77);
        let (b, rb) = generate(25, 77);
        assert_eq!(a.to_ascii(), b.to_ascii());
        assert_eq!(ra, rb);
    }

    #[test]
    fn guarded_cells_are_never_walled() {
        let mut grid = Grid::new(10).unwrap();
        for p in [Pos::new(0, 4), Pos::new(0, 5), Pos::new(9, 4), Pos::new(9, 5)] {
            let id = grid.id(p).unwrap();
            grid.cell_mut(id).opening_guard = true;
        }
        let report = MazeGenerator::new(StdRng::seed_from_u64(3)).generate(
            &mut grid,
            Region::square(10),
            &mut NoopObserver,
        );
        assert_eq!(report.divisions.len(), 1);
        for p in [Pos::new(0, 4), Pos::new(0, 5), Pos::new(9, 4), Pos::new(9, 5)] {
            assert!(grid.cell_at(p).unwrap().passable());
        }
    }

    #[test]
    fn endpoints_are_never_walled() {
        let mut grid = Grid::new(20).unwrap();
        grid.designate_start(Pos::new(10, 3));
        grid.designate_end(Pos::new(3, 10));
        MazeGenerator::new(StdRng::seed_from_u64(4)).generate_full(&mut grid, &mut NoopObserver);
        assert!(grid.is_passable(grid.start().unwrap()));
        assert!(grid.is_passable(grid.end().unwrap()));
    }

    #[test]
    fn endpoints_on_divider_crossings_stay_reachable() {
        // Crossing of the first division on a 20x20 grid is at row 9 or 10,
        // col 9 or 10; cover all four.
        for (sr, sc) in [(9, 9), (9, 10), (10, 9), (10, 10)] {
            for seed in 0..20 {
                let mut grid = Grid::new(20).unwrap();
                grid.designate_start(Pos::new(sr, sc));
                grid.designate_end(Pos::new(0, 0));
                MazeGenerator::new(StdRng::seed_from_u64(seed))
                    .generate_full(&mut grid, &mut NoopObserver);
                let start = grid.start().unwrap();
                assert!(grid.neighbors(start).any(|n| grid.is_passable(n)));
                assert!(open_cells_connected(&grid), "start ({sr}, {sc}) seed {seed}");
            }
        }
    }

    #[test]
    fn events_match_final_walls() {
        let mut grid = Grid::new(16).unwrap();
        let mut rec = Recorder::new();
        MazeGenerator::new(StdRng::seed_from_u64(9)).generate_full(&mut grid, &mut rec);
        let walls = grid.cells().filter(|(_, c)| !c.passable()).count();
        assert_eq!(rec.count(CellState::Wall) - rec.count(CellState::Open), walls);
    }

    #[test]
    fn search_runs_on_generated_maze() {
        let mut grid = Grid::new(21).unwrap();
        MazeGenerator::new(StdRng::seed_from_u64(12)).generate_full(&mut grid, &mut NoopObserver);
        // Corners of the grid are never on a divider.
        grid.designate_start(Pos::new(0, 0));
        grid.designate_end(Pos::new(20, 20));
        let out = SearchEngine::new().run_bfs(&mut grid, &mut NoopObserver).unwrap();
        assert!(out.is_found());
    }
}
