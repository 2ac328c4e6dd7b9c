//! Effect timing.
//!
//! The hardware millisecond counter is 32 bits wide and wraps roughly every
//! 49 days. Every comparison goes through [`Timestamp::elapsed_since`], which
//! uses wrapping subtraction, so expiry keeps working across the wrap.

use embassy_time::{Duration, Instant};

/// Monotonic millisecond timestamp that wraps at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp(u32);

impl Timestamp {
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Milliseconds since `earlier`, correct across a single wrap.
    pub const fn elapsed_since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Timestamp `millis` after this one.
    #[must_use]
    pub const fn offset(self, millis: u32) -> Self {
        Self(self.0.wrapping_add(millis))
    }

    /// Check if `deadline` is now or in the past.
    ///
    /// Deadlines are expected to be less than half the counter range away.
    pub const fn has_reached(self, deadline: Self) -> bool {
        self.0.wrapping_sub(deadline.0) < u32::MAX / 2
    }
}

impl From<Instant> for Timestamp {
    #[allow(clippy::cast_possible_truncation)]
    fn from(instant: Instant) -> Self {
        // Truncation is the wrap.
        Self(instant.as_millis() as u32)
    }
}

/// Convert a duration to whole milliseconds, saturating at `u32::MAX`.
pub fn duration_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Per-effect trigger clock with an optional self-expiring duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerTimer {
    start: Timestamp,
    /// Zero means continuous (never auto-stops)
    duration: u32,
}

impl TriggerTimer {
    pub const fn new() -> Self {
        Self {
            start: Timestamp::from_millis(0),
            duration: 0,
        }
    }

    /// Restart the clock at `now`.
    ///
    /// A zero `duration` runs until stopped.
    pub fn trigger(&mut self, now: Timestamp, duration: Duration) {
        self.start = now;
        self.duration = duration_millis(duration);
    }

    /// Drop the duration so the timer no longer expires.
    pub fn clear(&mut self) {
        self.duration = 0;
    }

    pub const fn start(&self) -> Timestamp {
        self.start
    }

    /// Duration in milliseconds, zero for continuous effects.
    pub const fn duration_ms(&self) -> u32 {
        self.duration
    }

    pub const fn is_timed(&self) -> bool {
        self.duration > 0
    }

    pub const fn elapsed(&self, now: Timestamp) -> u32 {
        now.elapsed_since(self.start)
    }

    /// True once a timed effect has run for its full duration.
    pub const fn should_stop(&self, now: Timestamp) -> bool {
        self.duration > 0 && now.elapsed_since(self.start) >= self.duration
    }
}
