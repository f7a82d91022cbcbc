//! Maze generation for the mazefinder sandbox.
//!
//! [`MazeGenerator`] carves a grid by recursive quadrant division: each
//! region is split by one full-height and one full-width wall, three of the
//! four wall arms around the crossing get a single-cell opening, and the
//! four quadrants are divided in turn until they are too small.

pub mod maze;

pub use maze::{Division, MazeConfig, MazeGenerator, MazeReport, Side};
