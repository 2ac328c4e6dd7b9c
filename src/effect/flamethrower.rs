use super::phase::{self, Follower, Segment};
use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::Rgb;
use crate::math8::level8;
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

const STEP_MS: u32 = 30;
const RAMP_RATE: u8 = 48;
const MIN_FLAME: f32 = 180.0;
const MAX_FLAME: f32 = 255.0;
const BURN_PHASE: usize = 1;

const SEQUENCE: [Segment; 3] = [
    Segment::ramp(250, 0, 255),
    Segment::hold(2500, 255),
    Segment::ramp(750, 255, 0),
];

const FLAME_COLOR: Rgb = Rgb { r: 255, g: 60, b: 0 };

/// Ignite, burn with a flickering sine, then taper off
#[derive(Debug, Clone, Copy, Default)]
pub struct FlamethrowerEffect;

#[derive(Debug, Clone)]
pub struct FlameState {
    follower: Follower,
    /// Per-zone flicker phase offset so zones do not pulse in lockstep
    offset: u32,
    done: bool,
}

/// Flicker level for a phase position in `0..100`
#[allow(clippy::cast_precision_loss)]
fn flame_level(position: u32, noise: &mut Noise) -> u8 {
    let wave = libm::sinf(position as f32 * 0.1) * 0.3 + 0.7;
    let jitter = noise.range(-10, 10) as f32;
    level8((wave * MAX_FLAME + jitter).clamp(MIN_FLAME, MAX_FLAME))
}

impl Effect for FlamethrowerEffect {
    const ID: EffectId = EffectId::Flamethrower;

    type ZoneState = FlameState;

    fn init_zone(&self, _slot: usize, _zone: &Zone, _now: Timestamp, noise: &mut Noise) -> FlameState {
        FlameState {
            follower: Follower::new(0),
            offset: noise.range_u32(0, 100),
            done: false,
        }
    }

    fn render_zone(
        &self,
        state: &mut FlameState,
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
        let target = if point.phase == BURN_PHASE {
            flame_level((frame.elapsed / STEP_MS + state.offset) % 100, frame.noise)
        } else {
            point.level
        };
        let level = state.follower.step(frame.now, STEP_MS, target, RAMP_RATE)?;
        Some(Shade::new(level, FLAME_COLOR))
    }
}
