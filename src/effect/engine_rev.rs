use super::phase::{self, Follower, Segment};
use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::Rgb;
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

const STEP_MS: u32 = 50;
const RAMP_RATE: u8 = 8;
const MIN_INTENSITY: u8 = 80;
const MAX_INTENSITY: u8 = 255;

const SEQUENCE: [Segment; 3] = [
    Segment::ramp(1500, MIN_INTENSITY, MAX_INTENSITY),
    Segment::hold(1000, MAX_INTENSITY),
    Segment::ramp(1500, MAX_INTENSITY, MIN_INTENSITY),
];

const REV_COLOR: Rgb = Rgb {
    r: 180,
    g: 200,
    b: 255,
};

/// Engine rev: climb to full, hold, settle back to idle
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineRevEffect;

#[derive(Debug, Clone)]
pub struct RevState {
    follower: Follower,
    done: bool,
}

impl Effect for EngineRevEffect {
    const ID: EffectId = EffectId::EngineRev;

    type ZoneState = RevState;

    fn init_zone(&self, _slot: usize, _zone: &Zone, _now: Timestamp, _noise: &mut Noise) -> RevState {
        RevState {
            follower: Follower::new(MIN_INTENSITY),
            done: false,
        }
    }

    fn render_zone(
        &self,
        state: &mut RevState,
        _zone: &Zone,
        frame: &mut FrameContext<'_>,
    ) -> Option<Shade> {
        if state.done {
            return None;
        }
        let Some(point) = phase::sample(&SEQUENCE, frame.elapsed) else {
            state.done = true;
            return Some(Shade::off());
        };
        let level = state
            .follower
            .step(frame.now, STEP_MS, point.level, RAMP_RATE)?;
        Some(Shade::new(level, REV_COLOR))
    }
}
