use mazefinder_core::{CellId, Dir, Grid, StepObserver, manhattan};

use crate::engine::{Algorithm, SearchEngine, SearchError, SearchOutcome, emit_visited};
use crate::heap::OpenEntry;
use crate::path::trace_parents;

impl SearchEngine {
    /// Goal-biased A* from the start.
    ///
    /// `h` is the Manhattan distance to the end. `g` is the Manhattan
    /// distance back to the start rather than the length of the path walked
    /// so far, which makes this a greedy best-first variant: paths are valid
    /// but not guaranteed shortest once walls are involved. After every
    /// extraction the open set also promotes its lowest-`h` entry to the
    /// front (see [`MinHeap::promote_closest`](crate::MinHeap::promote_closest)).
    ///
    /// Each cell enters the closed index at most once, so the search ends
    /// after at most `size²` expansions.
    pub fn run_astar(
        &mut self,
        grid: &mut Grid,
        observer: &mut impl StepObserver,
    ) -> Result<SearchOutcome, SearchError> {
        let (start, end) = self.begin(grid)?;
        let (sp, ep) = (grid.pos(start), grid.pos(end));

        {
            let s = grid.cell_mut(start);
            s.set_costs(0, manhattan(sp, ep));
            s.visited = true;
        }
        self.open.insert(OpenEntry::of(grid, start));

        let mut expanded = 0;
        let found = loop {
            let Some(entry) = self.open.extract_min() else {
                break false;
            };
            self.open.promote_closest();

            let cur = entry.id;
            if !self.closed.insert(grid.pos(cur), cur) {
                // Stale duplicate of a cell that was re-queued with a better cost.
                continue;
            }
            expanded += 1;
            if cur == end {
                break true;
            }

            let around: [Option<CellId>; 4] = Dir::SEARCH_ORDER.map(|d| grid.neighbor(cur, d));
            for n in around.into_iter().flatten() {
                let np = grid.pos(n);
                if !grid.is_passable(n) || self.closed.contains(np) {
                    continue;
                }
                let tentative = manhattan(np, sp);
                let cell = grid.cell(n);
                let queued = cell.visited;
                if tentative >= cell.g_cost() && queued {
                    continue;
                }

                let cell = grid.cell_mut(n);
                cell.search_parent = Some(cur);
                cell.set_costs(tentative, manhattan(np, ep));
                cell.visited = true;
                self.open.insert(OpenEntry::of(grid, n));
                if !queued {
                    emit_visited(grid, n, observer);
                }
            }
        };
        self.open.clear();
        self.closed.clear();

        let path = if found { trace_parents(grid, start, end) } else { None };
        Ok(self.finish(Algorithm::Astar, grid, path, expanded, observer))
    }
}
