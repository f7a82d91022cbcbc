//! **mazefinder-core**: the grid model shared by the mazefinder crates.
//!
//! A [`Grid`] owns a fixed square arena of [`Cell`]s linked to their
//! orthogonal neighbors by [`CellId`]. Search and maze engines mutate cells
//! in place and report each visible change to a [`StepObserver`].

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod observer;

pub use cell::{Cell, CellId, INFINITE};
pub use error::GridError;
pub use geom::{Dir, Pos, Region, manhattan};
pub use grid::{Grid, MAX_GRID_SIZE};
pub use observer::{CellState, NoopObserver, Recorder, StepEvent, StepObserver};
