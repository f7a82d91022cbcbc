use std::fmt;

use crate::grid::MAX_GRID_SIZE;

/// Errors raised while building a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Fewer than 2 cells per side.
    TooSmall { size: usize },
    /// More cells per side than the closed-index key space supports.
    TooLarge { size: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { size } => {
                write!(f, "grid size {size} is too small: need at least 2 cells per side")
            }
            Self::TooLarge { size } => {
                write!(f, "grid size {size} is too large: at most {MAX_GRID_SIZE} cells per side")
            }
        }
    }
}

impl std::error::Error for GridError {}
