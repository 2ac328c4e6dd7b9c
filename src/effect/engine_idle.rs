use core::f32::consts::PI;

use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::Rgb;
use crate::math8::level8;
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

const STEP_MS: u32 = 30;
const BASE_BRIGHTNESS: f32 = 120.0;
const PULSE_AMPLITUDE: f32 = 40.0;
const SMOOTHING: f32 = 0.2;
const PHASE_WRAP: f32 = 20.0 * PI;

const ENGINE_COLOR: Rgb = Rgb {
    r: 50,
    g: 100,
    b: 255,
};

/// Slow idle pulse around a drifting base level
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineIdleEffect;

#[derive(Debug, Clone)]
pub struct IdleState {
    last_step: Timestamp,
    brightness: f32,
    base: f32,
    phase: f32,
    speed: f32,
    next_variation: Timestamp,
}

impl Effect for EngineIdleEffect {
    const ID: EffectId = EffectId::EngineIdle;

    type ZoneState = IdleState;

    #[allow(clippy::cast_precision_loss)]
    fn init_zone(&self, _slot: usize, _zone: &Zone, now: Timestamp, noise: &mut Noise) -> IdleState {
        IdleState {
            last_step: now,
            brightness: BASE_BRIGHTNESS,
            base: BASE_BRIGHTNESS + noise.range(-20, 20) as f32,
            phase: noise.range(0, 628) as f32 / 100.0,
            speed: noise.range(80, 120) as f32 / 100.0,
            next_variation: now.offset(noise.range_u32(2000, 5000)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_zone(
        &self,
        state: &mut IdleState,
        _zone: &Zone,
        frame: &mut FrameContext<'_>,
    ) -> Option<Shade> {
        let dt_ms = frame.now.elapsed_since(state.last_step);
        if dt_ms < STEP_MS {
            return None;
        }
        let dt = dt_ms as f32 / 1000.0;

        state.phase = (state.phase + dt * state.speed * 2.0) % PHASE_WRAP;
        let pulse = libm::sinf(state.phase) * 0.5 + 0.5;
        let target = (state.base + pulse * PULSE_AMPLITUDE).clamp(0.0, 255.0);
        state.brightness = state.brightness * (1.0 - SMOOTHING) + target * SMOOTHING;

        if frame.now.has_reached(state.next_variation) {
            state.base = BASE_BRIGHTNESS + frame.noise.range(-30, 30) as f32;
            state.speed = frame.noise.range(60, 140) as f32 / 100.0;
            state.next_variation = frame.now.offset(frame.noise.range_u32(3000, 8000));
        }

        state.last_step = frame.now;
        Some(Shade::new(level8(state.brightness), ENGINE_COLOR))
    }
}
