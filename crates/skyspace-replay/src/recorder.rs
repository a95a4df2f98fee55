//! Per-tick trajectory recording.

use skyspace_core::{SimError, TickId};
use skyspace_engine::{run_to_completion, MoveRecord, RunSummary, Simulation, TickFrame, TickObserver};

use crate::hash::grid_hash;

/// What one tick looked like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// The tick.
    pub tick: TickId,
    /// [`grid_hash`] of the grid after the tick.
    pub grid_hash: u64,
    /// Applied moves in commit order.
    pub moves: Vec<MoveRecord>,
}

/// A [`TickObserver`] that keeps a [`Frame`] per tick.
#[derive(Clone, Debug, Default)]
pub struct FlightRecorder {
    frames: Vec<Frame>,
}

impl FlightRecorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `sim` to completion and return the recording.
    pub fn record<S: Simulation + ?Sized>(
        sim: &mut S,
        limit: Option<u64>,
    ) -> Result<(Self, RunSummary), SimError> {
        let mut recorder = Self::new();
        let summary = run_to_completion(sim, &mut recorder, limit)?;
        Ok((recorder, summary))
    }

    /// Recorded frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The most recent frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Consume the recorder, returning its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl TickObserver for FlightRecorder {
    fn on_tick(&mut self, frame: &TickFrame<'_>) {
        self.frames.push(Frame {
            tick: frame.tick,
            grid_hash: grid_hash(frame.grid),
            moves: frame.report.moves.clone(),
        });
    }
}
