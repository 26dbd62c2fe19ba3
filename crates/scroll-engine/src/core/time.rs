use crate::platform::Clock;

/// Clamp a raw frame interval to the largest step the simulation accepts.
/// Returns `min(elapsed_ms / 1000, max_delta)` in seconds.
pub fn clamp_delta(elapsed_ms: u64, max_delta: f32) -> f32 {
    (elapsed_ms as f32 / 1000.0).min(max_delta)
}

/// Frame governor plus delta-time source for the game loop.
/// Enforces a minimum interval between frames and bounds the step size on hitches.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    /// Minimum milliseconds between two frames.
    min_frame_millis: u64,
    /// Largest delta handed to the simulation, in seconds.
    max_delta: f32,
    /// Timestamp of the previous frame.
    last_ticks: u64,
}

impl FrameTimer {
    pub fn new(min_frame_millis: u64, max_delta: f32) -> Self {
        Self {
            min_frame_millis,
            max_delta,
            last_ticks: 0,
        }
    }

    /// Restart timing from the clock's current time.
    pub fn reset(&mut self, clock: &mut dyn Clock) {
        self.last_ticks = clock.now_millis();
    }

    /// Block until the minimum frame interval has passed, then return the
    /// clamped delta in seconds and start the next interval.
    pub fn tick(&mut self, clock: &mut dyn Clock) -> f32 {
        let target = self.last_ticks + self.min_frame_millis;
        let mut now = clock.now_millis();
        while now < target {
            clock.sleep_millis(target - now);
            now = clock.now_millis();
        }

        let dt = clamp_delta(now - self.last_ticks, self.max_delta);
        self.last_ticks = now;
        dt
    }

    pub fn last_ticks(&self) -> u64 {
        self.last_ticks
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}
