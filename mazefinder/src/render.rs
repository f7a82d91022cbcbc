//! Observers that draw step events: a crossterm terminal view and an
//! in-memory text canvas.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{self, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use mazefinder_core::{CellState, StepEvent, StepObserver};

// ---------------------------------------------------------------------------
// AsciiCanvas
// ---------------------------------------------------------------------------

/// Text buffer updated from step events, one glyph per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiCanvas {
    size: usize,
    glyphs: Vec<char>,
}

impl AsciiCanvas {
    /// A blank `size` x `size` canvas.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            glyphs: vec![CellState::Open.glyph(); size * size],
        }
    }

    /// Glyph at `(row, col)`, if on the canvas.
    pub fn glyph(&self, row: usize, col: usize) -> Option<char> {
        if row < self.size && col < self.size {
            Some(self.glyphs[row * self.size + col])
        } else {
            None
        }
    }

    /// One line per row, in the same layout as `Grid::to_ascii`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.glyphs.chunks(self.size.max(1)) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl StepObserver for AsciiCanvas {
    fn on_step(&mut self, event: StepEvent) {
        let StepEvent { pos, state } = event;
        if pos.row < self.size && pos.col < self.size {
            self.glyphs[pos.row * self.size + pos.col] = state.glyph();
        }
    }
}

// ---------------------------------------------------------------------------
// TermObserver
// ---------------------------------------------------------------------------

/// Maps a cell state to its background color.
fn to_ct_color(state: CellState) -> CtColor {
    match state {
        CellState::Open => CtColor::Reset,
        CellState::Wall => CtColor::DarkGrey,
        CellState::Visited => CtColor::DarkBlue,
        CellState::Path => CtColor::Yellow,
        CellState::Start => CtColor::Green,
        CellState::End => CtColor::Red,
    }
}

/// Draws each cell as two colored columns on a crossterm terminal,
/// pausing `delay` after every step.
///
/// [`StepObserver::on_step`] cannot fail, so the first I/O error is kept,
/// drawing stops, and the error comes back from [`TermObserver::close`].
pub struct TermObserver<W: Write> {
    out: W,
    delay: Duration,
    status_row: u16,
    error: Option<io::Error>,
}

impl TermObserver<io::Stdout> {
    /// Observer on stdout for a grid of `size` rows.
    pub fn stdout(size: usize, delay: Duration) -> Self {
        Self::new(io::stdout(), size, delay)
    }
}

impl<W: Write> TermObserver<W> {
    pub fn new(out: W, size: usize, delay: Duration) -> Self {
        Self {
            out,
            delay,
            status_row: u16::try_from(size).unwrap_or(u16::MAX).saturating_add(1),
            error: None,
        }
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
    }

    /// Write a line of text below the grid.
    pub fn status(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        let res = execute!(
            self.out,
            cursor::MoveTo(0, self.status_row),
            style::ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            style::Print(text)
        );
        if let Err(err) = res {
            self.error = Some(err);
        }
    }

    /// Block until a key is pressed.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let event::Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }

    /// Restore the terminal and report the first drawing error, if any.
    pub fn close(mut self) -> io::Result<()> {
        let restored = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let raw = terminal::disable_raw_mode();
        match self.error.take() {
            Some(err) => Err(err),
            None => restored.and(raw),
        }
    }

    fn draw(&mut self, event: StepEvent) -> io::Result<()> {
        let (Ok(x), Ok(y)) = (u16::try_from(event.pos.col * 2), u16::try_from(event.pos.row)) else {
            return Ok(());
        };
        let glyph = match event.state {
            CellState::Start | CellState::End => event.state.glyph(),
            _ => ' ',
        };
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetForegroundColor(CtColor::Black),
            SetBackgroundColor(to_ct_color(event.state)),
            style::Print(glyph),
            style::Print(' '),
            style::ResetColor
        )?;
        self.out.flush()
    }
}

impl<W: Write> StepObserver for TermObserver<W> {
    fn on_step(&mut self, event: StepEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.draw(event) {
            self.error = Some(err);
            return;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}
