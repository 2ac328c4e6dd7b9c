use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::Rgb;
use crate::math8::{lerp8, level8};
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

const PULSE_INTERVAL_MS: u32 = 400;
const MAX_PULSES: u32 = 6;
/// Pulse decay: 25 levels per 80 ms
const DECAY_PER_STEP: u32 = 25;
const DECAY_STEP_MS: u32 = 80;

const TRIUMPH_MS: u32 = 3000;
const GLOW_MS: u32 = 1500;
const FADE_MS: u32 = 500;
const GLOW_LEVEL: f32 = 200.0;

const TRIUMPH_COLOR: Rgb = Rgb { r: 255, g: 180, b: 0 };
const GLOW_COLOR: Rgb = Rgb {
    r: 255,
    g: 160,
    b: 20,
};
const FADE_COLOR: Rgb = Rgb { r: 255, g: 140, b: 0 };

/// Victory celebration: triumph pulses, a warm glow, then fade out
#[derive(Debug, Clone, Copy, Default)]
pub struct VictoryEffect;

/// Intensity and color `elapsed` ms into the celebration, `None` once over
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn victory_shade(elapsed: u32) -> Option<Shade> {
    if elapsed < TRIUMPH_MS {
        let pulse = (elapsed / PULSE_INTERVAL_MS).min(MAX_PULSES - 1);
        let since = elapsed - pulse * PULSE_INTERVAL_MS;
        let decay = since * DECAY_PER_STEP / DECAY_STEP_MS;
        let level = 255u32.saturating_sub(decay) as u8;
        return Some(Shade::new(level, TRIUMPH_COLOR));
    }

    let glow = elapsed - TRIUMPH_MS;
    if glow < GLOW_MS {
        let wave = 0.85 + 0.15 * libm::sinf(glow as f32 * 0.008);
        return Some(Shade::new(level8(wave * GLOW_LEVEL), GLOW_COLOR));
    }

    let fade = glow - GLOW_MS;
    if fade < FADE_MS {
        return Some(Shade::new(lerp8(200, 0, fade, FADE_MS), FADE_COLOR));
    }
    None
}

impl Effect for VictoryEffect {
    const ID: EffectId = EffectId::Victory;

    /// Set once the final dark frame was written
    type ZoneState = bool;

    fn init_zone(&self, _slot: usize, _zone: &Zone, _now: Timestamp, _noise: &mut Noise) -> bool {
        false
    }

    fn render_zone(&self, done: &mut bool, _zone: &Zone, frame: &mut FrameContext<'_>) -> Option<Shade> {
        if *done {
            return None;
        }
        victory_shade(frame.elapsed).or_else(|| {
            *done = true;
            Some(Shade::off())
        })
    }
}
