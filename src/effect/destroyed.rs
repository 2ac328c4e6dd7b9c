use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::{Rgb, blend_colors};
use crate::math8::{lerp8, level8};
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

/// Start delay added per target slot
const STAGGER_MS: u32 = 50;

const EXPLOSION_MS: u32 = 2000;
const EXPLOSION_INTERVAL_MS: u32 = 300;
const MAX_EXPLOSIONS: u32 = 5;
/// Burst decay: 20 levels per 100 ms
const BURST_DECAY: u32 = 20;
const BURST_DECAY_MS: u32 = 100;

const FIRE_MS: u32 = 3000;
const SPARK_MS: u32 = 2000;
const SPARK_STEP_MS: u32 = 100;
const SPARK_CHANCE: u8 = 20;
const SPARK_DECAY: u8 = 10;
const FADE_MS: u32 = 1000;

const EXPLOSION_COLOR: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 128,
};
const FIRE_COLOR: Rgb = Rgb { r: 255, g: 60, b: 0 };
const SPARK_COLOR: Rgb = Rgb { r: 255, g: 80, b: 64 };
const EMBER_COLOR: Rgb = Rgb { r: 255, g: 64, b: 0 };

/// Destruction sequence: explosions, fire, sparks, embers
#[derive(Debug, Clone, Copy, Default)]
pub struct DestroyedEffect;

#[derive(Debug, Clone)]
pub struct DestructionState {
    /// Delay before this zone joins in
    delay: u32,
    level: u8,
    last_spark: Option<u32>,
    done: bool,
}

impl DestructionState {
    fn sparks(&mut self, local: u32, noise: &mut Noise) -> u8 {
        let due = self
            .last_spark
            .is_none_or(|last| local.saturating_sub(last) >= SPARK_STEP_MS);
        if due {
            self.last_spark = Some(local);
            self.level = if noise.chance(SPARK_CHANCE) {
                level_from(noise.range_u32(100, 200))
            } else {
                self.level.saturating_sub(SPARK_DECAY)
            };
        }
        self.level
    }
}

#[allow(clippy::cast_possible_truncation)]
fn level_from(value: u32) -> u8 {
    value.min(255) as u8
}

impl Effect for DestroyedEffect {
    const ID: EffectId = EffectId::Destroyed;

    type ZoneState = DestructionState;

    #[allow(clippy::cast_possible_truncation)]
    fn init_zone(&self, slot: usize, _zone: &Zone, _now: Timestamp, _noise: &mut Noise) -> DestructionState {
        DestructionState {
            delay: (slot as u32).saturating_mul(STAGGER_MS),
            level: 0,
            last_spark: None,
            done: false,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_zone(
        &self,
        state: &mut DestructionState,
        _zone: &Zone,
        frame: &mut FrameContext<'_>,
    ) -> Option<Shade> {
        if state.done || frame.elapsed < state.delay {
            return None;
        }
        let local = frame.elapsed - state.delay;

        if local < EXPLOSION_MS {
            let burst = (local / EXPLOSION_INTERVAL_MS).min(MAX_EXPLOSIONS - 1);
            let since = local - burst * EXPLOSION_INTERVAL_MS;
            state.level = level_from(255u32.saturating_sub(since * BURST_DECAY / BURST_DECAY_MS));
            return Some(Shade::new(state.level, EXPLOSION_COLOR));
        }

        let fire = local - EXPLOSION_MS;
        if fire < FIRE_MS {
            let wave = 0.7 + 0.3 * libm::sinf(fire as f32 * 0.01);
            let crackle = frame.noise.range(0, 40) as f32;
            state.level = level8(wave * 200.0 + crackle);
            return Some(Shade::new(state.level, FIRE_COLOR));
        }

        let spark = fire - FIRE_MS;
        if spark < SPARK_MS {
            let level = state.sparks(local, frame.noise);
            return Some(Shade::new(level, SPARK_COLOR));
        }

        let fade = spark - SPARK_MS;
        if fade < FADE_MS {
            state.level = lerp8(50, 0, fade, FADE_MS);
            let cooling = lerp8(0, 255, fade, FADE_MS);
            return Some(Shade::new(
                state.level,
                blend_colors(SPARK_COLOR, EMBER_COLOR, cooling),
            ));
        }

        state.done = true;
        state.level = 0;
        Some(Shade::off())
    }
}
