use mazefinder_core::{CellId, Dir, Grid, StepObserver};

use crate::engine::{Algorithm, SearchEngine, SearchError, SearchOutcome, emit_visited};
use crate::path::trace_distances;

impl SearchEngine {
    /// Breadth-first search from the start.
    ///
    /// Every open, unvisited neighbor is queued with `distance + 1` and
    /// marked visited. The search stops the moment the end is queued; the
    /// path is then recovered from the distance gradient.
    pub fn run_bfs(
        &mut self,
        grid: &mut Grid,
        observer: &mut impl StepObserver,
    ) -> Result<SearchOutcome, SearchError> {
        let (start, end) = self.begin(grid)?;

        {
            let s = grid.cell_mut(start);
            s.visited = true;
            s.distance = 0;
        }
        self.queue.push_back(start);

        let mut expanded = 0;
        let mut found = false;
        'search: while let Some(cur) = self.queue.pop_front() {
            expanded += 1;
            let dist = grid.cell(cur).distance;
            let around: [Option<CellId>; 4] = Dir::SEARCH_ORDER.map(|d| grid.neighbor(cur, d));

            for n in around.into_iter().flatten() {
                let cell = grid.cell(n);
                if !cell.passable() || cell.visited {
                    continue;
                }
                let cell = grid.cell_mut(n);
                cell.visited = true;
                cell.distance = dist + 1;
                self.queue.push_back(n);
                emit_visited(grid, n, observer);

                if n == end {
                    found = true;
                    break 'search;
                }
            }
        }
        self.queue.clear();

        let path = if found { trace_distances(grid, end) } else { None };
        Ok(self.finish(Algorithm::Bfs, grid, path, expanded, observer))
    }
}
