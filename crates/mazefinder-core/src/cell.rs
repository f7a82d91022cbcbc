//! The [`Cell`] type: one grid position and its search state.

use crate::geom::{Dir, Pos};

/// Sentinel for an A* cost that has not been computed this episode.
pub const INFINITE: u32 = u32::MAX;

/// Index of a cell in its grid's flat, row-major cell array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// The flat array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single grid cell.
///
/// Identity and neighbor links are fixed at grid construction. Passability
/// is only changed through [`Grid`](crate::Grid) so endpoint protection
/// holds. Everything else is transient episode state, cleared by
/// [`Grid::reset`](crate::Grid::reset).
#[derive(Clone, Debug)]
pub struct Cell {
    pos: Pos,
    passable: bool,
    neighbors: [Option<CellId>; 4],
    g_cost: u32,
    h_cost: u32,
    f_cost: u32,
    /// Queued or expanded by the current search.
    pub visited: bool,
    /// BFS hop count from the start; 0 when unset or at the start itself.
    pub distance: u32,
    /// Predecessor on the best known path (A* and DFS).
    pub search_parent: Option<CellId>,
    /// Set next to a punched maze opening so later dividers leave it alone.
    pub opening_guard: bool,
    /// Part of the last reconstructed path.
    pub on_path: bool,
}

impl Cell {
    pub(crate) fn new(pos: Pos) -> Self {
        Self {
            pos,
            passable: true,
            neighbors: [None; 4],
            g_cost: INFINITE,
            h_cost: INFINITE,
            f_cost: INFINITE,
            visited: false,
            distance: 0,
            search_parent: None,
            opening_guard: false,
            on_path: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.pos.col
    }

    /// `true` for open path, `false` for a wall.
    #[inline]
    pub fn passable(&self) -> bool {
        self.passable
    }

    #[inline]
    pub(crate) fn set_passable(&mut self, passable: bool) {
        self.passable = passable;
    }

    /// The neighbor in `dir`, or `None` at the grid boundary.
    #[inline]
    pub fn neighbor(&self, dir: Dir) -> Option<CellId> {
        self.neighbors[dir.slot()]
    }

    #[inline]
    pub(crate) fn link(&mut self, dir: Dir, id: Option<CellId>) {
        self.neighbors[dir.slot()] = id;
    }

    /// Number of filled neighbor slots.
    pub fn degree(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }

    #[inline]
    pub fn g_cost(&self) -> u32 {
        self.g_cost
    }

    #[inline]
    pub fn h_cost(&self) -> u32 {
        self.h_cost
    }

    #[inline]
    pub fn f_cost(&self) -> u32 {
        self.f_cost
    }

    /// Set both A* costs; `f` always follows as `g + h`.
    #[inline]
    pub fn set_costs(&mut self, g: u32, h: u32) {
        self.g_cost = g;
        self.h_cost = h;
        self.f_cost = g.saturating_add(h);
    }

    /// Clear every transient field, leaving identity, links and passability.
    pub(crate) fn clear_transient(&mut self) {
        self.visited = false;
        self.distance = 0;
        self.g_cost = INFINITE;
        self.h_cost = INFINITE;
        self.f_cost = INFINITE;
        self.search_parent = None;
        self.opening_guard = false;
        self.on_path = false;
    }
}
