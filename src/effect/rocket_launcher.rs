use super::phase::{self, Follower, Segment};
use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::Rgb;
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

const STEP_MS: u32 = 25;
const RAMP_RATE: u8 = 96;

/// Charge, launch flash, afterglow, fade
const SEQUENCE: [Segment; 4] = [
    Segment::ramp(300, 0, 120),
    Segment::hold(200, 255),
    Segment::ramp(800, 200, 80),
    Segment::ramp(700, 80, 0),
];

const PHASE_COLORS: [Rgb; 4] = [
    Rgb {
        r: 128,
        g: 128,
        b: 255,
    },
    Rgb {
        r: 255,
        g: 255,
        b: 255,
    },
    Rgb { r: 255, g: 80, b: 64 },
    Rgb { r: 255, g: 85, b: 0 },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RocketLauncherEffect;

#[derive(Debug, Clone)]
pub struct LaunchState {
    follower: Follower,
    done: bool,
}

impl Effect for RocketLauncherEffect {
    const ID: EffectId = EffectId::RocketLauncher;

    type ZoneState = LaunchState;

    fn init_zone(&self, _slot: usize, _zone: &Zone, _now: Timestamp, _noise: &mut Noise) -> LaunchState {
        LaunchState {
            follower: Follower::new(0),
            done: false,
        }
    }

    fn render_zone(
        &self,
        state: &mut LaunchState,
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
        let color = PHASE_COLORS.get(point.phase).copied().unwrap_or_default();
        Some(Shade::new(level, color))
    }
}
