//! Mazefinder: a sandbox for watching BFS, DFS and A* explore a grid maze.

pub mod command;
pub mod config;
pub mod render;
pub mod sandbox;

pub use command::{Command, CommandError, CommandErrorKind, parse_script};
pub use config::SandboxConfig;
pub use render::{AsciiCanvas, TermObserver};
pub use sandbox::{Report, Sandbox};
