//! The sandbox: one grid, one search engine, one maze generator, driven by
//! [`Command`]s.

use std::fmt;

use mazefinder_core::{Grid, GridError, Pos, StepEvent, StepObserver};
use mazefinder_maze::MazeGenerator;
use mazefinder_paths::{Algorithm, SearchEngine, SearchError, SearchOutcome};
use rand::Rng;

use crate::command::Command;

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// A wall or endpoint edit; `changed` is false for no-ops such as
    /// out-of-bounds positions or edits on an endpoint.
    Edited { command: Command, changed: bool },
    Searched { algorithm: Algorithm, outcome: SearchOutcome },
    Maze { divisions: usize },
    Reset,
    Shuffled { start: Option<Pos>, end: Option<Pos> },
    Cleared,
    Shown(String),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edited { command, changed: true } => write!(f, "{command}: done"),
            Self::Edited { command, changed: false } => write!(f, "{command}: no change"),
            Self::Searched { algorithm, outcome } => write!(f, "{algorithm}: {outcome}"),
            Self::Maze { divisions } => write!(f, "maze: {divisions} divisions"),
            Self::Reset => f.write_str("grid reset"),
            Self::Shuffled { start, end } => {
                f.write_str("endpoints shuffled")?;
                if let (Some(s), Some(e)) = (start, end) {
                    write!(f, ": start {s}, end {e}")?;
                }
                Ok(())
            }
            Self::Cleared => f.write_str("search cleared"),
            Self::Shown(ascii) => f.write_str(ascii.trim_end_matches('\n')),
        }
    }
}

/// Owns the grid and the engines that act on it.
pub struct Sandbox<R: Rng> {
    grid: Grid,
    engine: SearchEngine,
    maze: MazeGenerator<R>,
}

impl<R: Rng> Sandbox<R> {
    /// A `size` x `size` open grid with random endpoints.
    pub fn new(size: usize, mut rng: R) -> Result<Self, GridError> {
        let grid = Grid::with_endpoints(size, &mut rng)?;
        Ok(Self {
            grid,
            engine: SearchEngine::new(),
            maze: MazeGenerator::new(rng),
        })
    }

    /// Wrap an existing grid, keeping its walls and endpoints.
    pub fn from_grid(grid: Grid, rng: R) -> Self {
        Self {
            grid,
            engine: SearchEngine::new(),
            maze: MazeGenerator::new(rng),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Send the full grid state to `observer`.
    pub fn repaint(&self, observer: &mut impl StepObserver) {
        self.grid.repaint(observer);
    }

    /// Run one command.
    ///
    /// Searches clear the previous episode first, so they can be repeated
    /// back to back. Only a search can fail.
    pub fn apply(
        &mut self,
        command: Command,
        observer: &mut impl StepObserver,
    ) -> Result<Report, SearchError> {
        log::debug!("sandbox: {command}");
        let report = match command {
            Command::Wall(p) | Command::Open(p) => {
                let changed = self.grid.set_passable(p, matches!(command, Command::Open(_)));
                if changed {
                    self.emit(p, observer);
                }
                Report::Edited { command, changed }
            }
            Command::Start(p) | Command::End(p) => {
                let old = match command {
                    Command::Start(_) => self.grid.start(),
                    _ => self.grid.end(),
                };
                let changed = match command {
                    Command::Start(_) => self.grid.designate_start(p),
                    _ => self.grid.designate_end(p),
                };
                if changed {
                    if let Some(old) = old {
                        self.emit(self.grid.pos(old), observer);
                    }
                    self.emit(p, observer);
                }
                Report::Edited { command, changed }
            }
            Command::Search(algorithm) => {
                if !self.grid.is_clean() {
                    self.grid.clear_search();
                    self.grid.repaint(observer);
                }
                let outcome = self.engine.run(algorithm, &mut self.grid, observer)?;
                Report::Searched { algorithm, outcome }
            }
            Command::Reset => {
                self.grid.reset();
                self.grid.repaint(observer);
                Report::Reset
            }
            Command::Shuffle => {
                self.grid.reset_randomized(&mut self.maze.rng);
                self.grid.repaint(observer);
                Report::Shuffled {
                    start: self.grid.start().map(|id| self.grid.pos(id)),
                    end: self.grid.end().map(|id| self.grid.pos(id)),
                }
            }
            Command::Clear => {
                self.grid.clear_search();
                self.grid.repaint(observer);
                Report::Cleared
            }
            Command::Maze => {
                self.grid.reset();
                self.grid.repaint(observer);
                let report = self.maze.generate_full(&mut self.grid, observer);
                Report::Maze {
                    divisions: report.divisions.len(),
                }
            }
            Command::Show => Report::Shown(self.grid.to_ascii()),
        };
        Ok(report)
    }

    fn emit(&self, p: Pos, observer: &mut impl StepObserver) {
        if let Some(id) = self.grid.id(p) {
            observer.on_step(StepEvent::new(p, self.grid.state_of(id)));
        }
    }
}
