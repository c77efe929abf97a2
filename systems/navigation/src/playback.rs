//! Timed stepping along a path snapshot.

use std::time::Duration;

use maze_runner_core::CellCoord;

/// Path being walked plus the time banked towards the next step.
#[derive(Clone, Debug, Default)]
pub(crate) struct Playback {
    path: Vec<CellCoord>,
    cursor: usize,
    elapsed: Duration,
}

impl Playback {
    /// Begins walking `path`. The first step is due immediately.
    pub(crate) fn start(&mut self, path: Vec<CellCoord>, step_delay: Duration) {
        self.path = path;
        self.cursor = 0;
        self.elapsed = step_delay;
    }

    pub(crate) fn cancel(&mut self) {
        self.path.clear();
        self.cursor = 0;
        self.elapsed = Duration::ZERO;
    }

    pub(crate) fn accumulate(&mut self, dt: Duration) {
        if !self.is_finished() {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    /// Returns the next cell once a full step delay has been banked.
    ///
    /// At most one step is released per call and surplus time is capped at
    /// one delay.
    pub(crate) fn next_step(&mut self, step_delay: Duration) -> Option<CellCoord> {
        if self.elapsed < step_delay {
            return None;
        }
        let cell = *self.path.get(self.cursor)?;
        self.cursor += 1;
        self.elapsed = (self.elapsed - step_delay).min(step_delay);
        Some(cell)
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.cursor >= self.path.len()
    }

    /// Cells not yet stepped onto.
    pub(crate) fn remaining(&self) -> &[CellCoord] {
        self.path.get(self.cursor..).unwrap_or(&[])
    }
}
