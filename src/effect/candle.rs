use core::f32::consts::PI;

use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::{Rgb, rgb_from_u32};
use crate::math8::level8;
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

const STEP_MS: u32 = 20;
const MIN_BRIGHTNESS: f32 = 40.0;
const BRIGHTNESS_VARIANCE: f32 = 80.0;
const SMOOTHING: f32 = 0.3;
/// Phase wraps here to keep float precision over long runs
const PHASE_WRAP: f32 = 20.0 * PI;

const FLAME_COLOR: Rgb = rgb_from_u32(0xFF_93_29);

/// Candle flicker built from three detuned sines plus a little noise
#[derive(Debug, Clone, Copy, Default)]
pub struct CandleEffect;

#[derive(Debug, Clone)]
pub struct FlickerState {
    last_step: Timestamp,
    brightness: f32,
    base: f32,
    phase: f32,
    speed: f32,
    next_change: Timestamp,
}

#[allow(clippy::cast_precision_loss)]
fn random_base(noise: &mut Noise, spread: i32) -> f32 {
    MIN_BRIGHTNESS + noise.range(0, spread) as f32
}

#[allow(clippy::cast_precision_loss)]
fn random_speed(noise: &mut Noise) -> f32 {
    noise.range(50, 200) as f32 / 100.0
}

impl Effect for CandleEffect {
    const ID: EffectId = EffectId::Candle;

    type ZoneState = FlickerState;

    #[allow(clippy::cast_precision_loss)]
    fn init_zone(&self, _slot: usize, _zone: &Zone, now: Timestamp, noise: &mut Noise) -> FlickerState {
        FlickerState {
            last_step: now,
            brightness: MIN_BRIGHTNESS,
            base: random_base(noise, 30),
            phase: noise.range(0, 628) as f32 / 100.0,
            speed: random_speed(noise),
            next_change: now.offset(noise.range_u32(500, 2000)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_zone(
        &self,
        state: &mut FlickerState,
        _zone: &Zone,
        frame: &mut FrameContext<'_>,
    ) -> Option<Shade> {
        let dt_ms = frame.now.elapsed_since(state.last_step);
        if dt_ms < STEP_MS {
            return None;
        }
        let dt = dt_ms as f32 / 1000.0;

        state.phase = (state.phase + dt * state.speed * PI) % PHASE_WRAP;

        let main = libm::sinf(state.phase) * 0.3;
        let micro = libm::sinf(state.phase * 7.3) * 0.15;
        let drift = libm::sinf(state.phase * 0.4) * 0.2;
        let jitter = (frame.noise.range(-100, 100) as f32 / 1000.0) * 0.1;
        let flicker = main + micro + drift + jitter;

        let target = (state.base + flicker * BRIGHTNESS_VARIANCE).clamp(MIN_BRIGHTNESS, 255.0);
        state.brightness = state.brightness * (1.0 - SMOOTHING) + target * SMOOTHING;

        if frame.now.has_reached(state.next_change) {
            state.base = random_base(frame.noise, 40);
            state.speed = random_speed(frame.noise);
            state.next_change = frame.now.offset(frame.noise.range_u32(1000, 3000));
        }

        state.last_step = frame.now;
        Some(Shade::new(level8(state.brightness), FLAME_COLOR))
    }
}
