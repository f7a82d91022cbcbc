//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Default side length of the grid.
pub const DEFAULT_SIZE: usize = 30;

/// Per-step delay used for the terminal animation when none is given.
pub const DEFAULT_TERM_DELAY_MS: u64 = 10;

/// Grid pathfinding and maze sandbox.
///
/// Commands are read one per line from a script, e.g. `maze`, `wall 3 4`,
/// `start 0 0`, `bfs`, `clear`, `astar`, `show`. Lines starting with `#` are
/// comments.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SandboxConfig {
    /// Cells per side of the square grid
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Seed for endpoint placement and maze generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay per animation step in milliseconds
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Print reports and the final grid as text instead of animating
    #[arg(long)]
    pub headless: bool,

    /// Command script to run; `-` reads stdin, absent runs the demo script
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            delay_ms: None,
            headless: false,
            script: None,
            log_file: None,
        }
    }
}

impl SandboxConfig {
    /// The animation delay: explicit value, else none headless and
    /// [`DEFAULT_TERM_DELAY_MS`] in the terminal.
    pub fn step_delay(&self) -> Duration {
        let ms = match (self.delay_ms, self.headless) {
            (Some(ms), _) => ms,
            (None, true) => 0,
            (None, false) => DEFAULT_TERM_DELAY_MS,
        };
        Duration::from_millis(ms)
    }

    /// A seeded generator when `--seed` was given, else one from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Log filter used when `RUST_LOG` is unset. The terminal view owns the
    /// screen, so it only lets warnings through unless logs go to a file.
    pub fn default_log_filter(&self) -> &'static str {
        if self.headless || self.log_file.is_some() {
            "info"
        } else {
            "warn"
        }
    }
}
