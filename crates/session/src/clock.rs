use std::time::Instant;

/// Time sample handed to one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the session started. Drives waves and sway.
    pub elapsed: f32,
    /// Seconds since the previous tick. Drives locomotion.
    pub delta: f32,
}

/// Source of frame times.
pub trait Clock {
    fn advance(&mut self) -> FrameTime;
}

/// Largest delta a [`WallClock`] reports, so a stalled frame cannot launch the vehicle.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Monotonic wall clock.
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn advance(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32().min(MAX_FRAME_DELTA);
        self.last = now;
        FrameTime {
            elapsed: now.duration_since(self.start).as_secs_f32(),
            delta,
        }
    }
}

/// Constant-step clock for headless runs and tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    step: f32,
    ticks: u64,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step, ticks: 0 }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Clock for FixedClock {
    fn advance(&mut self) -> FrameTime {
        self.ticks += 1;
        FrameTime {
            // Multiplied rather than summed so long runs do not drift.
            elapsed: self.ticks as f32 * self.step,
            delta: self.step,
        }
    }
}
