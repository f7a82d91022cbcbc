//! The step-observer seam between the engine and whatever draws it.
//!
//! Every visible mutation (a cell visited, a wall drawn or opened, a path
//! cell marked) is reported as a [`StepEvent`]. Observers are fire-and-forget:
//! nothing they do is read back by the engine.

use crate::geom::Pos;

/// The state a cell was moved into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Open,
    Wall,
    Visited,
    Path,
    Start,
    End,
}

impl CellState {
    /// Single-character rendering used by the ASCII views.
    pub const fn glyph(self) -> char {
        match self {
            CellState::Open => ' ',
            CellState::Wall => '#',
            CellState::Visited => '.',
            CellState::Path => '*',
            CellState::Start => 'S',
            CellState::End => 'E',
        }
    }
}

/// One cell mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    pub pos: Pos,
    pub state: CellState,
}

impl StepEvent {
    #[inline]
    pub const fn new(pos: Pos, state: CellState) -> Self {
        Self { pos, state }
    }
}

/// Receives a callback after each meaningful mutation.
pub trait StepObserver {
    fn on_step(&mut self, event: StepEvent);
}

impl<F: FnMut(StepEvent)> StepObserver for F {
    #[inline]
    fn on_step(&mut self, event: StepEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    #[inline]
    fn on_step(&mut self, _event: StepEvent) {}
}

/// Collects events in order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<StepEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.events.iter().filter(|e| e.state == state).count()
    }
}

impl StepObserver for Recorder {
    fn on_step(&mut self, event: StepEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut obs = |e: StepEvent| seen.push(e.pos);
            obs.on_step(StepEvent::new(Pos::new(1, 1), CellState::Visited));
            obs.on_step(StepEvent::new(Pos::new(1, 2), CellState::Wall));
        }
        assert_eq!(seen, vec![Pos::new(1, 1), Pos::new(1, 2)]);
    }

    #[test]
    fn recorder_counts_by_state() {
        let mut r = Recorder::new();
        r.on_step(StepEvent::new(Pos::new(0, 0), CellState::Wall));
        r.on_step(StepEvent::new(Pos::new(0, 1), CellState::Wall));
        r.on_step(StepEvent::new(Pos::new(0, 2), CellState::Open));
        assert_eq!(r.count(CellState::Wall), 2);
        assert_eq!(r.count(CellState::Open), 1);
        assert_eq!(r.count(CellState::Path), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn step_event_round_trip() {
        let ev = StepEvent::new(Pos::new(3, 7), CellState::Path);
        let json = serde_json::to_string(&ev).unwrap();
        let back: StepEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
