//! Multi-phase linear sequences.
//!
//! A sequence is a list of segments laid end to end. Sampling is a pure
//! function of elapsed time, so an effect built on it can be resumed or
//! tested without a running clock.

use crate::math8::{approach8, lerp8};
use crate::timer::Timestamp;

/// One linear segment of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Segment length in milliseconds
    pub duration: u32,
    pub from: u8,
    pub to: u8,
}

impl Segment {
    pub const fn ramp(duration: u32, from: u8, to: u8) -> Self {
        Self { duration, from, to }
    }

    pub const fn hold(duration: u32, level: u8) -> Self {
        Self {
            duration,
            from: level,
            to: level,
        }
    }
}

/// Position within a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePoint {
    /// Index of the active segment
    pub phase: usize,
    /// Interpolated level
    pub level: u8,
    /// Milliseconds into the active segment
    pub into: u32,
}

/// Total length of a sequence in milliseconds
pub const fn total(segments: &[Segment]) -> u32 {
    let mut sum = 0u32;
    let mut i = 0;
    while i < segments.len() {
        sum = sum.saturating_add(segments[i].duration);
        i += 1;
    }
    sum
}

/// Locate `elapsed` in the sequence.
///
/// Segments are half-open (`start..start + duration`); returns `None` once
/// the whole sequence has elapsed.
pub fn sample(segments: &[Segment], elapsed: u32) -> Option<PhasePoint> {
    let mut start = 0u32;
    for (phase, segment) in segments.iter().enumerate() {
        let into = elapsed - start;
        if into < segment.duration {
            return Some(PhasePoint {
                phase,
                level: lerp8(segment.from, segment.to, into, segment.duration),
                into,
            });
        }
        start = start.saturating_add(segment.duration);
        if start > elapsed {
            break;
        }
    }
    None
}

/// Rate-limited follower for a sampled level.
///
/// Steps at most once per interval and never moves further than
/// `max_step` per step. The first step happens on the first call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Follower {
    level: u8,
    last_step: Option<Timestamp>,
}

impl Follower {
    pub const fn new(level: u8) -> Self {
        Self {
            level,
            last_step: None,
        }
    }

    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Move toward `target`; `None` between steps
    pub fn step(&mut self, now: Timestamp, interval: u32, target: u8, max_step: u8) -> Option<u8> {
        if let Some(last) = self.last_step
            && now.elapsed_since(last) < interval
        {
            return None;
        }
        self.last_step = Some(now);
        self.level = approach8(self.level, target, max_step);
        Some(self.level)
    }
}
