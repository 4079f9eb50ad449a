//! The wave shift driver.
//!
//! Linear and endlessly repeating: the shift ratio climbs from 0 towards 1
//! over one period and wraps back to exactly 0. The host calls
//! [`WaveShiftAnimator::advance`] from its own fixed-interval timer.

use std::time::Duration;

/// Largest `f32` strictly below 1.
const MAX_RATIO: f32 = 1.0 - f32::EPSILON / 2.0;

/// Looping shift-ratio driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveShiftAnimator {
    /// Length of one full shift cycle.
    period: Duration,
    /// Nanoseconds into the current cycle, always `< period`.
    elapsed: u128,
    /// Whether `advance` moves time forward.
    running: bool,
}

impl WaveShiftAnimator {
    /// One full wavelength of scrolling per second.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

    /// Creates a stopped animator with the default period.
    #[must_use]
    pub fn new() -> Self {
        Self::with_period(Self::DEFAULT_PERIOD)
    }

    /// Creates a stopped animator with a custom period (at least 1 ns).
    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_nanos(1)),
            elapsed: 0,
            running: false,
        }
    }

    /// Cycle length.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true while ticks advance the cycle.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts (or keeps) the cycle running from its current position.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops the cycle; later ticks are ignored.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Current shift ratio in `[0, 1)`.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        let ratio = self.elapsed as f64 / self.period.as_nanos() as f64;
        (ratio as f32).min(MAX_RATIO)
    }

    /// Advances by `dt`, returning the new ratio, or `None` when stopped.
    pub fn advance(&mut self, dt: Duration) -> Option<f32> {
        if !self.running {
            return None;
        }
        self.elapsed = (self.elapsed + dt.as_nanos()) % self.period.as_nanos();
        Some(self.ratio())
    }
}

impl Default for WaveShiftAnimator {
    fn default() -> Self {
        Self::new()
    }
}
