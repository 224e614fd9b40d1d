//! Frame clock: seconds since start, clamped delta, frame counter.

use std::time::{Duration, Instant};

/// Largest delta handed out, so a stall does not produce a giant step.
pub const MAX_DELTA: Duration = Duration::from_millis(100);

/// Timing for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped to `MAX_DELTA`.
    pub delta: f32,
    /// Frame number (first tick is 0).
    pub frame: u64,
}

/// Monotonic frame clock.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame: u64,
}

impl FrameClock {
    /// Starts a clock now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame: 0,
        }
    }

    /// Advances to the next frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last).min(MAX_DELTA);
        self.last = now;

        let time = FrameTime {
            elapsed: now.duration_since(self.start).as_secs_f32(),
            delta: delta.as_secs_f32(),
            frame: self.frame,
        };
        self.frame += 1;
        time
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
