//! Tick scheduling
//!
//! A single timer handle per engine. Changing speed replaces the schedule
//! in place instead of starting a second one.

use std::time::Duration;

/// Maximum ticks released by one `advance` call, so a long stall cannot
/// fast-forward the snake through many cells at once
pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

/// Accumulating fixed-interval tick clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimer {
    interval: Duration,
    elapsed: Duration,
    generation: u64,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            generation: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Bumped every time the schedule is replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Feed elapsed wall time, returning how many ticks are now due
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval && due < MAX_TICKS_PER_ADVANCE {
            self.elapsed -= self.interval;
            due += 1;
        }
        if due == MAX_TICKS_PER_ADVANCE {
            // Drop the backlog rather than replaying it later
            self.elapsed = self.elapsed.min(self.interval);
        }
        due
    }

    /// Cancel the current schedule and start a new one at `interval`
    pub fn reschedule(&mut self, interval: Duration) {
        self.interval = interval;
        self.elapsed = Duration::ZERO;
        self.generation += 1;
    }
}
