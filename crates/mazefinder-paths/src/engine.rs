use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use mazefinder_core::{CellId, CellState, Grid, Pos, StepEvent, StepObserver};

use crate::closed::ClosedIndex;
use crate::heap::MinHeap;

// ---------------------------------------------------------------------------
// Algorithm / state / outcome
// ---------------------------------------------------------------------------

/// The available search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Astar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Astar => "A*",
        })
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "astar" | "a*" => Ok(Self::Astar),
            other => Err(format!("unknown algorithm {other:?}")),
        }
    }
}

/// Where the engine is in its current episode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Found,
    Exhausted,
}

/// Terminal result of a search episode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The end was reached. `path` runs from the cell next to the end back
    /// to the start (end excluded, start included), so its length is the
    /// number of unit steps taken.
    Found { path: Vec<Pos>, expanded: usize },
    /// The frontier emptied first.
    Exhausted { expanded: usize },
}

impl SearchOutcome {
    /// Number of steps on the found path.
    pub fn path_len(&self) -> Option<usize> {
        match self {
            Self::Found { path, .. } => Some(path.len()),
            Self::Exhausted { .. } => None,
        }
    }

    /// Cells dequeued, extracted or entered during the episode.
    pub fn expanded(&self) -> usize {
        match self {
            Self::Found { expanded, .. } | Self::Exhausted { expanded } => *expanded,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { path, expanded } => {
                write!(f, "found, path length {} ({expanded} expanded)", path.len())
            }
            Self::Exhausted { expanded } => write!(f, "exhausted ({expanded} expanded)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which endpoint is missing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// Reasons a search did not start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint has not been designated.
    NotReady(Endpoint),
    /// The previous episode's state is still on the grid.
    ResetRequired,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady(Endpoint::Start) => f.write_str("not ready: no start cell designated"),
            Self::NotReady(Endpoint::End) => f.write_str("not ready: no end cell designated"),
            Self::ResetRequired => f.write_str("previous search state must be cleared first"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Runs BFS, DFS and A* over a [`Grid`], reusing its frontier buffers
/// between episodes.
#[derive(Debug)]
pub struct SearchEngine {
    pub(crate) state: SearchState,
    pub(crate) queue: VecDeque<CellId>,
    pub(crate) stack: Vec<(CellId, usize)>,
    pub(crate) open: MinHeap,
    pub(crate) closed: ClosedIndex,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            state: SearchState::Idle,
            queue: VecDeque::new(),
            stack: Vec::new(),
            open: MinHeap::new(),
            closed: ClosedIndex::new(),
        }
    }

    /// State of the most recent episode.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Dispatch to the chosen algorithm.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        grid: &mut Grid,
        observer: &mut impl StepObserver,
    ) -> Result<SearchOutcome, SearchError> {
        match algorithm {
            Algorithm::Bfs => self.run_bfs(grid, observer),
            Algorithm::Dfs => self.run_dfs(grid, observer),
            Algorithm::Astar => self.run_astar(grid, observer),
        }
    }

    /// Check preconditions and open a new episode.
    pub(crate) fn begin(&mut self, grid: &mut Grid) -> Result<(CellId, CellId), SearchError> {
        let start = grid.start().ok_or(SearchError::NotReady(Endpoint::Start))?;
        let end = grid.end().ok_or(SearchError::NotReady(Endpoint::End))?;
        if !grid.is_clean() {
            return Err(SearchError::ResetRequired);
        }
        grid.begin_episode();
        self.queue.clear();
        self.stack.clear();
        self.open.clear();
        self.closed.clear();
        self.state = SearchState::Running;
        Ok((start, end))
    }

    /// Record the terminal state, color the path and build the outcome.
    pub(crate) fn finish(
        &mut self,
        algorithm: Algorithm,
        grid: &mut Grid,
        path: Option<Vec<CellId>>,
        expanded: usize,
        observer: &mut impl StepObserver,
    ) -> SearchOutcome {
        let outcome = match path {
            Some(path) => {
                self.state = SearchState::Found;
                crate::path::mark_path(grid, &path, observer);
                SearchOutcome::Found {
                    path: path.into_iter().map(|id| grid.pos(id)).collect(),
                    expanded,
                }
            }
            None => {
                self.state = SearchState::Exhausted;
                SearchOutcome::Exhausted { expanded }
            }
        };
        log::info!("search: {algorithm} {outcome}");
        outcome
    }
}

/// Report a newly visited cell unless it is an endpoint.
#[inline]
pub(crate) fn emit_visited(grid: &Grid, id: CellId, observer: &mut impl StepObserver) {
    if !grid.is_endpoint(id) {
        observer.on_step(StepEvent::new(grid.pos(id), CellState::Visited));
    }
}
