//! Walking back from the end once a search has found it.

use mazefinder_core::{CellId, CellState, Grid, StepEvent, StepObserver};

/// Follow the BFS distance gradient from `end` down to the start.
///
/// At each step the first visited neighbor (in search order) whose distance
/// is exactly one less is taken. Returns `None` if `end` was never reached
/// or the gradient is broken, so a failed search can never be walked.
pub fn trace_distances(grid: &Grid, end: CellId) -> Option<Vec<CellId>> {
    let target = grid.cell(end);
    if !target.visited {
        return None;
    }
    let mut path = Vec::with_capacity(target.distance as usize);
    let mut cur = end;
    while grid.cell(cur).distance > 0 {
        let want = grid.cell(cur).distance - 1;
        let next = grid.neighbors(cur).find(|&n| {
            let c = grid.cell(n);
            c.visited && c.passable() && c.distance == want
        })?;
        path.push(next);
        cur = next;
    }
    Some(path)
}

/// Follow `search_parent` links from `end` back to `start`.
///
/// Returns `None` if a link is missing or the chain is longer than the grid
/// (which would mean a cycle).
pub fn trace_parents(grid: &Grid, start: CellId, end: CellId) -> Option<Vec<CellId>> {
    let mut path = Vec::new();
    let mut cur = end;
    while cur != start {
        let parent = grid.cell(cur).search_parent?;
        path.push(parent);
        if path.len() > grid.len() {
            return None;
        }
        cur = parent;
    }
    Some(path)
}

/// Flag the path cells and report them, skipping the start.
pub(crate) fn mark_path(grid: &mut Grid, path: &[CellId], observer: &mut impl StepObserver) {
    for &id in path {
        grid.cell_mut(id).on_path = true;
        if !grid.is_endpoint(id) {
            observer.on_step(StepEvent::new(grid.pos(id), CellState::Path));
        }
    }
}
