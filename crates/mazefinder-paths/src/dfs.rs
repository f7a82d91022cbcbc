use mazefinder_core::{Dir, Grid, StepObserver};

use crate::engine::{Algorithm, SearchEngine, SearchError, SearchOutcome, emit_visited};
use crate::path::trace_parents;

impl SearchEngine {
    /// Depth-first search from the start.
    ///
    /// Neighbors are tried in search order and the first open, unvisited one
    /// is entered immediately, before its siblings are looked at. The stack
    /// holds `(cell, next direction)` frames so the visit order is the same
    /// as the recursive formulation. Stops when the end is entered; the path
    /// follows parent links and is not necessarily shortest.
    pub fn run_dfs(
        &mut self,
        grid: &mut Grid,
        observer: &mut impl StepObserver,
    ) -> Result<SearchOutcome, SearchError> {
        let (start, end) = self.begin(grid)?;

        grid.cell_mut(start).visited = true;
        self.stack.push((start, 0));

        let mut expanded = 1;
        let mut found = false;
        while let Some(&(cur, next)) = self.stack.last() {
            let Some(&dir) = Dir::SEARCH_ORDER.get(next) else {
                self.stack.pop();
                continue;
            };
            let top = self.stack.len() - 1;
            self.stack[top].1 += 1;

            let Some(n) = grid.neighbor(cur, dir) else {
                continue;
            };
            let cell = grid.cell(n);
            if !cell.passable() || cell.visited {
                continue;
            }
            let cell = grid.cell_mut(n);
            cell.visited = true;
            cell.search_parent = Some(cur);
            expanded += 1;
            emit_visited(grid, n, observer);

            if n == end {
                found = true;
                break;
            }
            self.stack.push((n, 0));
        }
        self.stack.clear();

        let path = if found { trace_parents(grid, start, end) } else { None };
        Ok(self.finish(Algorithm::Dfs, grid, path, expanded, observer))
    }
}
