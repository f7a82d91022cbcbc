//! The [`Grid`] type: a fixed `size × size` arena of [`Cell`]s.
//!
//! Cells live in one flat row-major `Vec` for the grid's whole lifetime.
//! Neighbor links and search parents are [`CellId`] indexes into that array,
//! so there is no ownership between cells and nothing can dangle.

use std::ops::Range;

use rand::Rng;

use crate::cell::{Cell, CellId};
use crate::error::GridError;
use crate::geom::{Dir, Pos};
use crate::observer::{CellState, StepEvent, StepObserver};

/// Largest supported side length.
pub const MAX_GRID_SIZE: usize = 65_535;

/// An `size × size` grid with a designated start and end cell.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    start: Option<CellId>,
    end: Option<CellId>,
    clean: bool,
}

impl Grid {
    /// Allocate a grid and link every cell to its orthogonal neighbors.
    ///
    /// No endpoints are designated yet; see [`Grid::with_endpoints`].
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size < 2 {
            return Err(GridError::TooSmall { size });
        }
        if size > MAX_GRID_SIZE {
            return Err(GridError::TooLarge { size });
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Pos::new(row, col)));
            }
        }

        // Links are computed only once every cell exists.
        for i in 0..cells.len() {
            let pos = cells[i].pos();
            for dir in Dir::ALL {
                let n = pos.step(dir, size).map(|p| CellId(p.row * size + p.col));
                cells[i].link(dir, n);
            }
        }

        log::info!("grid: built {size}x{size}");
        Ok(Self {
            size,
            cells,
            start: None,
            end: None,
            clean: true,
        })
    }

    /// [`Grid::new`] followed by [`Grid::randomize_endpoints`].
    pub fn with_endpoints(size: usize, rng: &mut impl Rng) -> Result<Self, GridError> {
        let mut grid = Self::new(size)?;
        grid.randomize_endpoints(rng);
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row < self.size && p.col < self.size
    }

    /// The id of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn id(&self, p: Pos) -> Option<CellId> {
        self.contains(p).then(|| CellId(p.row * self.size + p.col))
    }

    #[inline]
    pub fn pos(&self, id: CellId) -> Pos {
        self.cells[id.0].pos()
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    /// Mutable access for the search and maze engines. Passability is not
    /// reachable from here; use [`Grid::set_passable`].
    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    #[inline]
    pub fn cell_at(&self, p: Pos) -> Option<&Cell> {
        self.id(p).map(|id| &self.cells[id.0])
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    #[inline]
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    #[inline]
    pub fn is_endpoint(&self, id: CellId) -> bool {
        self.start == Some(id) || self.end == Some(id)
    }

    #[inline]
    pub fn neighbor(&self, id: CellId, dir: Dir) -> Option<CellId> {
        self.cells[id.0].neighbor(dir)
    }

    /// Existing neighbors of `id` in [`Dir::SEARCH_ORDER`].
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        let cell = &self.cells[id.0];
        Dir::SEARCH_ORDER.into_iter().filter_map(move |d| cell.neighbor(d))
    }

    /// Whether the cell is open and a search may enter it.
    #[inline]
    pub fn is_passable(&self, id: CellId) -> bool {
        self.cells[id.0].passable()
    }

    /// `true` when no search state from a previous episode is left over.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.clean
    }

    /// Mark the start of a search episode. The grid stays dirty until
    /// [`Grid::clear_search`] or [`Grid::reset`].
    #[inline]
    pub fn begin_episode(&mut self) {
        self.clean = false;
    }

    /// The displayed state of a cell.
    pub fn state_of(&self, id: CellId) -> CellState {
        let cell = &self.cells[id.0];
        if self.start == Some(id) {
            CellState::Start
        } else if self.end == Some(id) {
            CellState::End
        } else if !cell.passable() {
            CellState::Wall
        } else if cell.on_path {
            CellState::Path
        } else if cell.visited {
            CellState::Visited
        } else {
            CellState::Open
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Make the cell at `p` open (`true`) or a wall (`false`).
    ///
    /// Out-of-bounds positions and the endpoints are left untouched. Returns
    /// whether the cell changed.
    pub fn set_passable(&mut self, p: Pos, passable: bool) -> bool {
        let Some(id) = self.id(p) else {
            return false;
        };
        let changed = self.carve(id, passable);
        if changed {
            log::info!("grid: {} at {p}", if passable { "opened" } else { "walled" });
        }
        changed
    }

    /// [`Grid::set_passable`] by id without the log line, for bulk editors
    /// such as the maze generator.
    pub fn carve(&mut self, id: CellId, passable: bool) -> bool {
        if self.is_endpoint(id) {
            return false;
        }
        let cell = &mut self.cells[id.0];
        if cell.passable() == passable {
            return false;
        }
        cell.set_passable(passable);
        true
    }

    /// Move the start to `p`. Fails when `p` is out of bounds or is the end.
    pub fn designate_start(&mut self, p: Pos) -> bool {
        let Some(id) = self.id(p) else {
            return false;
        };
        if self.end == Some(id) {
            return false;
        }
        self.start = Some(self.relocate(self.start, id));
        log::info!("grid: start set to {p}");
        true
    }

    /// Move the end to `p`. Fails when `p` is out of bounds or is the start.
    pub fn designate_end(&mut self, p: Pos) -> bool {
        let Some(id) = self.id(p) else {
            return false;
        };
        if self.start == Some(id) {
            return false;
        }
        self.end = Some(self.relocate(self.end, id));
        log::info!("grid: end set to {p}");
        true
    }

    /// Return the old endpoint to a plain open cell and prepare the new one.
    fn relocate(&mut self, old: Option<CellId>, new: CellId) -> CellId {
        if let Some(old) = old {
            self.release(old);
        }
        self.cells[new.0].set_passable(true);
        new
    }

    fn release(&mut self, id: CellId) {
        let cell = &mut self.cells[id.0];
        cell.clear_transient();
        cell.set_passable(true);
    }

    /// Pick a start in the top-left quadrant and an end in the bottom-right
    /// one, stepping one cell in from the outer border where there is room.
    pub fn randomize_endpoints(&mut self, rng: &mut impl Rng) {
        let half = self.size / 2;
        let near = inset_low(0, half);
        let far = inset_high(half, self.size);

        let start = Pos::new(rng.random_range(near.clone()), rng.random_range(near));
        let end = Pos::new(rng.random_range(far.clone()), rng.random_range(far));

        for id in [self.start.take(), self.end.take()].into_iter().flatten() {
            self.release(id);
        }
        self.start = self.id(start).map(|id| self.relocate(None, id));
        self.end = self.id(end).map(|id| self.relocate(None, id));
        log::info!("grid: endpoints randomized, start {start}, end {end}");
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Clear search state on every cell, keeping walls.
    pub fn clear_search(&mut self) {
        for cell in &mut self.cells {
            cell.clear_transient();
        }
        self.clean = true;
        log::info!("grid: search state cleared");
    }

    /// Clear all transient state and reopen every wall. Endpoints stay put.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.clear_transient();
            cell.set_passable(true);
        }
        self.clean = true;
        log::info!("grid: reset");
    }

    /// Drop every maze opening guard, leaving walls and search state alone.
    pub fn clear_opening_guards(&mut self) {
        for cell in &mut self.cells {
            cell.opening_guard = false;
        }
    }

    /// [`Grid::reset`], then pick fresh endpoints.
    pub fn reset_randomized(&mut self, rng: &mut impl Rng) {
        self.reset();
        self.randomize_endpoints(rng);
    }

    // -----------------------------------------------------------------------
    // Presentation helpers
    // -----------------------------------------------------------------------

    /// Report the current state of every cell, row by row.
    pub fn repaint(&self, observer: &mut impl StepObserver) {
        for (id, cell) in self.cells() {
            observer.on_step(StepEvent::new(cell.pos(), self.state_of(id)));
        }
    }

    /// One line per row using [`CellState::glyph`].
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for (id, cell) in self.cells() {
            out.push(self.state_of(id).glyph());
            if cell.col() + 1 == self.size {
                out.push('\n');
            }
        }
        out
    }
}

/// `[lo + 1, hi)` when that is non-empty, else `[lo, hi)`.
fn inset_low(lo: usize, hi: usize) -> Range<usize> {
    if lo + 1 < hi { lo + 1..hi } else { lo..hi }
}

/// `[lo, hi - 1)` when that is non-empty, else `[lo, hi)`.
fn inset_high(lo: usize, hi: usize) -> Range<usize> {
    if lo + 1 < hi { lo..hi - 1 } else { lo..hi }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::INFINITE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid_with(size: usize, start: Pos, end: Pos) -> Grid {
        let mut g = Grid::new(size).unwrap();
        assert!(g.designate_start(start));
        assert!(g.designate_end(end));
        g
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert_eq!(Grid::new(0).unwrap_err(), GridError::TooSmall { size: 0 });
        assert_eq!(Grid::new(1).unwrap_err(), GridError::TooSmall { size: 1 });
        assert!(Grid::new(MAX_GRID_SIZE + 1).is_err());
        assert!(Grid::new(2).is_ok());
    }

    #[test]
    fn neighbor_counts_by_position() {
        let g = Grid::new(5).unwrap();
        for (_, cell) in g.cells() {
            let edge_r = cell.row() == 0 || cell.row() == 4;
            let edge_c = cell.col() == 0 || cell.col() == 4;
            let expected = match (edge_r, edge_c) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            assert_eq!(cell.degree(), expected, "cell {}", cell.pos());
        }
    }

    #[test]
    fn two_by_two_corners_have_two_neighbors() {
        let g = Grid::new(2).unwrap();
        for (_, cell) in g.cells() {
            assert_eq!(cell.degree(), 2);
        }
    }

    #[test]
    fn neighbor_links_are_symmetric() {
        let g = Grid::new(6).unwrap();
        for (id, cell) in g.cells() {
            for dir in Dir::ALL {
                if let Some(n) = cell.neighbor(dir) {
                    assert_eq!(g.neighbor(n, dir.opposite()), Some(id));
                    assert!(cell.pos().is_adjacent(g.pos(n)));
                }
            }
        }
    }

    #[test]
    fn neighbors_follow_search_order() {
        let g = Grid::new(3).unwrap();
        let center = g.id(Pos::new(1, 1)).unwrap();
        let order: Vec<Pos> = g.neighbors(center).map(|n| g.pos(n)).collect();
        assert_eq!(
            order,
            vec![Pos::new(1, 0), Pos::new(2, 1), Pos::new(1, 2), Pos::new(0, 1)]
        );
    }

    #[test]
    fn set_passable_ignores_out_of_bounds_and_endpoints() {
        let mut g = grid_with(4, Pos::new(0, 0), Pos::new(3, 3));
        assert!(!g.set_passable(Pos::new(4, 0), false));
        assert!(!g.set_passable(Pos::new(0, 0), false));
        assert!(!g.set_passable(Pos::new(3, 3), false));
        assert!(g.cell_at(Pos::new(0, 0)).unwrap().passable());

        assert!(g.set_passable(Pos::new(1, 1), false));
        assert!(!g.set_passable(Pos::new(1, 1), false));
        assert_eq!(g.state_of(g.id(Pos::new(1, 1)).unwrap()), CellState::Wall);
        assert!(g.set_passable(Pos::new(1, 1), true));
    }

    #[test]
    fn designate_refuses_other_endpoint() {
        let mut g = grid_with(4, Pos::new(0, 0), Pos::new(3, 3));
        assert!(!g.designate_start(Pos::new(3, 3)));
        assert!(!g.designate_end(Pos::new(0, 0)));
        assert!(!g.designate_start(Pos::new(9, 9)));
        assert_eq!(g.start(), g.id(Pos::new(0, 0)));
        assert_eq!(g.end(), g.id(Pos::new(3, 3)));
    }

    #[test]
    fn designate_restores_previous_endpoint() {
        let mut g = grid_with(4, Pos::new(0, 0), Pos::new(3, 3));
        g.set_passable(Pos::new(2, 2), false);
        let old = g.start().unwrap();
        g.cell_mut(old).visited = true;

        assert!(g.designate_start(Pos::new(2, 2)));
        assert_eq!(g.start(), g.id(Pos::new(2, 2)));
        assert!(g.cell_at(Pos::new(2, 2)).unwrap().passable());
        assert!(!g.cell(old).visited);
        assert_eq!(g.state_of(old), CellState::Open);
    }

    #[test]
    fn moved_endpoint_drops_path_and_cost_state() {
        let mut g = grid_with(4, Pos::new(0, 0), Pos::new(3, 3));
        let old = g.start().unwrap();
        let parent = g.id(Pos::new(0, 1));
        g.begin_episode();
        {
            let c = g.cell_mut(old);
            c.visited = true;
            c.on_path = true;
            c.search_parent = parent;
            c.set_costs(0, 6);
        }

        assert!(g.designate_start(Pos::new(0, 3)));
        let c = g.cell(old);
        assert!(!c.on_path);
        assert_eq!(c.search_parent, None);
        assert_eq!(c.f_cost(), INFINITE);
        assert_eq!(g.state_of(old), CellState::Open);
        assert!(g.to_ascii().starts_with("   S\n"));
    }

    #[test]
    fn randomized_endpoints_land_in_opposite_quadrants() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [2, 3, 4, 9, 30] {
            let mut g = Grid::new(size).unwrap();
            for _ in 0..20 {
                g.randomize_endpoints(&mut rng);
                let s = g.pos(g.start().unwrap());
                let e = g.pos(g.end().unwrap());
                assert_ne!(s, e);
                assert!(s.row < size / 2 && s.col < size / 2);
                assert!(e.row >= size / 2 && e.col >= size / 2);
            }
        }
    }

    #[test]
    fn randomized_endpoints_avoid_border_when_possible() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut g = Grid::new(10).unwrap();
        for _ in 0..50 {
            g.randomize_endpoints(&mut rng);
            let s = g.pos(g.start().unwrap());
            let e = g.pos(g.end().unwrap());
            assert!(s.row >= 1 && s.col >= 1);
            assert!(e.row <= 8 && e.col <= 8);
        }
    }

    #[test]
    fn reset_reopens_walls_and_clears_state() {
        let mut g = grid_with(5, Pos::new(0, 0), Pos::new(4, 4));
        g.set_passable(Pos::new(2, 2), false);
        let id = g.id(Pos::new(1, 1)).unwrap();
        g.begin_episode();
        {
            let c = g.cell_mut(id);
            c.visited = true;
            c.distance = 2;
            c.set_costs(2, 6);
            c.opening_guard = true;
        }
        g.reset();
        assert!(g.is_clean());
        assert!(g.cells().all(|(_, c)| c.passable() && !c.visited && c.distance == 0));
        assert!(g.cells().all(|(_, c)| c.f_cost() == INFINITE && !c.opening_guard));
        assert_eq!(g.start(), g.id(Pos::new(0, 0)));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut g = grid_with(6, Pos::new(1, 1), Pos::new(4, 4));
        g.set_passable(Pos::new(3, 2), false);
        g.cell_mut(g.id(Pos::new(2, 2)).unwrap()).visited = true;
        g.reset();
        let once = g.to_ascii();
        let snapshot: Vec<_> = g
            .cells()
            .map(|(_, c)| (c.passable(), c.visited, c.distance, c.g_cost(), c.search_parent))
            .collect();
        g.reset();
        assert_eq!(g.to_ascii(), once);
        let again: Vec<_> = g
            .cells()
            .map(|(_, c)| (c.passable(), c.visited, c.distance, c.g_cost(), c.search_parent))
            .collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn clear_search_keeps_walls() {
        let mut g = grid_with(4, Pos::new(0, 0), Pos::new(3, 3));
        g.set_passable(Pos::new(1, 2), false);
        g.begin_episode();
        g.cell_mut(g.id(Pos::new(2, 2)).unwrap()).visited = true;
        g.clear_search();
        assert!(g.is_clean());
        assert!(!g.cell_at(Pos::new(1, 2)).unwrap().passable());
        assert!(!g.cell_at(Pos::new(2, 2)).unwrap().visited);
    }

    mod capture {
        use std::sync::Mutex;

        pub static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

        struct Capture;

        impl log::Log for Capture {
            fn enabled(&self, _: &log::Metadata<'_>) -> bool {
                true
            }

            fn log(&self, record: &log::Record<'_>) {
                if let Ok(mut records) = RECORDS.lock() {
                    records.push((record.level(), record.args().to_string()));
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: Capture = Capture;

        pub fn install() {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Trace);
        }
    }

    #[test]
    fn clear_search_logs_at_info() {
        capture::install();
        let mut g = grid_with(3, Pos::new(0, 0), Pos::new(2, 2));
        g.clear_search();
        let records = capture::RECORDS.lock().unwrap();
        let cleared: Vec<_> = records
            .iter()
            .filter(|(_, msg)| msg == "grid: search state cleared")
            .collect();
        assert!(!cleared.is_empty());
        assert!(cleared.iter().all(|(level, _)| *level == log::Level::Info));
    }

    #[test]
    fn ascii_rendering() {
        let mut g = grid_with(3, Pos::new(0, 0), Pos::new(2, 2));
        g.set_passable(Pos::new(1, 1), false);
        assert_eq!(g.to_ascii(), "S  \n # \n  E\n");
    }

    #[test]
    fn repaint_reports_every_cell() {
        let g = grid_with(3, Pos::new(0, 0), Pos::new(2, 2));
        let mut rec = crate::observer::Recorder::new();
        g.repaint(&mut rec);
        assert_eq!(rec.events.len(), 9);
        assert_eq!(rec.count(CellState::Start), 1);
        assert_eq!(rec.count(CellState::End), 1);
        assert_eq!(rec.count(CellState::Open), 7);
    }
}
