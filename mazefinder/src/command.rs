//! Text commands driving the sandbox.
//!
//! Every input source (script file, stdin) is normalized into [`Command`]
//! values before reaching [`Sandbox`](crate::Sandbox).

use std::fmt;
use std::str::FromStr;

use mazefinder_core::Pos;
use mazefinder_paths::Algorithm;

/// A single sandbox action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Draw a wall.
    Wall(Pos),
    /// Erase a wall.
    Open(Pos),
    /// Move the start.
    Start(Pos),
    /// Move the end.
    End(Pos),
    /// Run a search.
    Search(Algorithm),
    /// Reopen every wall and clear search state. Endpoints stay.
    Reset,
    /// [`Command::Reset`] and pick new random endpoints.
    Shuffle,
    /// Clear search state only.
    Clear,
    /// Reset, then generate a maze over the whole grid.
    Maze,
    /// Report the grid as text.
    Show,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall(p) => write!(f, "wall {} {}", p.row, p.col),
            Self::Open(p) => write!(f, "open {} {}", p.row, p.col),
            Self::Start(p) => write!(f, "start {} {}", p.row, p.col),
            Self::End(p) => write!(f, "end {} {}", p.row, p.col),
            Self::Search(Algorithm::Bfs) => f.write_str("bfs"),
            Self::Search(Algorithm::Dfs) => f.write_str("dfs"),
            Self::Search(Algorithm::Astar) => f.write_str("astar"),
            Self::Reset => f.write_str("reset"),
            Self::Shuffle => f.write_str("shuffle"),
            Self::Clear => f.write_str("clear"),
            Self::Maze => f.write_str("maze"),
            Self::Show => f.write_str("show"),
        }
    }
}

/// What was wrong with a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandErrorKind {
    Unknown(String),
    MissingArgument { command: &'static str },
    BadNumber(String),
    TrailingInput(String),
}

impl fmt::Display for CommandErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command {word:?}"),
            Self::MissingArgument { command } => write!(f, "{command} needs a row and a column"),
            Self::BadNumber(word) => write!(f, "{word:?} is not a cell index"),
            Self::TrailingInput(rest) => write!(f, "unexpected trailing input {rest:?}"),
        }
    }
}

impl std::error::Error for CommandErrorKind {}

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    /// 1-based line number.
    pub line: usize,
    pub kind: CommandErrorKind,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl FromStr for Command {
    type Err = CommandErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandErrorKind::Unknown(String::new()));
        };
        let head = head.to_ascii_lowercase();
        let cmd = match head.as_str() {
            "wall" => Self::Wall(pos_arg("wall", &mut words)?),
            "open" | "erase" => Self::Open(pos_arg("open", &mut words)?),
            "start" => Self::Start(pos_arg("start", &mut words)?),
            "end" => Self::End(pos_arg("end", &mut words)?),
            "reset" => Self::Reset,
            "shuffle" => Self::Shuffle,
            "clear" => Self::Clear,
            "maze" => Self::Maze,
            "show" => Self::Show,
            other => match other.parse::<Algorithm>() {
                Ok(algorithm) => Self::Search(algorithm),
                Err(_) => return Err(CommandErrorKind::Unknown(other.to_string())),
            },
        };
        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(CommandErrorKind::TrailingInput(rest.join(" ")));
        }
        Ok(cmd)
    }
}

fn pos_arg<'a>(
    command: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Pos, CommandErrorKind> {
    let mut next = || -> Result<usize, CommandErrorKind> {
        let word = words.next().ok_or(CommandErrorKind::MissingArgument { command })?;
        word.parse().map_err(|_| CommandErrorKind::BadNumber(word.to_string()))
    };
    let row = next()?;
    let col = next()?;
    Ok(Pos::new(row, col))
}

/// Parse a whole script. Blank lines and `#` comments are skipped; the
/// first bad line aborts with its line number.
pub fn parse_script(text: &str) -> Result<Vec<Command>, CommandError> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cmd = line
            .parse()
            .map_err(|kind| CommandError { line: i + 1, kind })?;
        out.push(cmd);
    }
    Ok(out)
}

/// Script run when none is supplied.
pub const DEMO_SCRIPT: &str = "\
# generate a maze, then let each search have a go
maze
bfs
dfs
astar
show
";
