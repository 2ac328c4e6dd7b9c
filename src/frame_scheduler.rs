//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::engine::EffectEngine;
use crate::output::ZoneDriver;
use crate::scene::SceneStore;
use crate::zone::ZoneModel;

/// Default target frame rate (50 FPS, one candle step per frame).
pub const DEFAULT_FPS: u32 = 50;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Zones written to the driver this frame.
    pub zones_written: usize,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Runs one engine update per frame
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(engine);
/// scheduler.engine_mut().begin(Instant::now());
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///
///     // Platform-specific sleep
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<Z: ZoneModel, S: SceneStore, D: ZoneDriver> {
    engine: EffectEngine<Z, S, D>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<Z: ZoneModel, S: SceneStore, D: ZoneDriver> FrameScheduler<Z, S, D> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (50 FPS) for frame timing.
    pub fn new(engine: EffectEngine<Z, S, D>) -> Self {
        Self::with_frame_duration(engine, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(engine: EffectEngine<Z, S, D>, frame_duration: Duration) -> Self {
        Self {
            engine,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Past two frames of lag, skip the backlog instead of bursting
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let zones_written = self.engine.update(now);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            zones_written,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub const fn engine(&self) -> &EffectEngine<Z, S, D> {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut EffectEngine<Z, S, D> {
        &mut self.engine
    }

    /// Give the engine back, dropping the pacing state
    pub fn into_engine(self) -> EffectEngine<Z, S, D> {
        self.engine
    }
}
