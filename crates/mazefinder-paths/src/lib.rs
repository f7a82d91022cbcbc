//! Step-by-step grid search for the mazefinder sandbox.
//!
//! [`SearchEngine`] runs three strategies over a [`mazefinder_core::Grid`],
//! mutating cell state in place and reporting every change to a
//! [`mazefinder_core::StepObserver`]:
//!
//! - **BFS** ([`SearchEngine::run_bfs`]): shortest hop count, path recovered
//!   from the distance gradient.
//! - **DFS** ([`SearchEngine::run_dfs`]): depth-first flood, path from
//!   parent links.
//! - **A\*** ([`SearchEngine::run_astar`]): goal-biased best-first search
//!   over a [`MinHeap`] open set and a [`ClosedIndex`].

mod astar;
mod bfs;
mod closed;
mod dfs;
mod engine;
mod heap;
mod path;

pub use closed::{ClosedIndex, cantor_key};
pub use engine::{Algorithm, Endpoint, SearchEngine, SearchError, SearchOutcome, SearchState};
pub use heap::{MinHeap, OpenEntry};
pub use path::{trace_distances, trace_parents};
