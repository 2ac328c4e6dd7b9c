//! Damage alert.
//!
//! Takes over its zones with a red flicker, then hands them back exactly as
//! they were. The committed value of each zone is captured when a run
//! starts and restored, once, when the effect is disabled for any reason:
//! expiry, explicit disable, stop or a retarget.

use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::{Rgb, scale_color};
use crate::math8::{lerp8, scale8, unscale_ceiling};
use crate::output::{OutputSink, Shade, ZoneValue};
use crate::timer::Timestamp;
use crate::zone::{Zone, ZoneId};

const FLICKER_INTERVAL_MS: u32 = 80;
const FLICKER_ON_MS: u32 = FLICKER_INTERVAL_MS / 2;
const DAMAGE_BRIGHTNESS: u8 = 200;
/// Off-beat level: 30 % of the captured level, before the zone ceiling
const RESIDUAL_SCALE: u8 = 77;
const RESIDUAL_COLOR_SCALE: u8 = 80;

const ALERT_COLOR: Rgb = Rgb { r: 255, g: 50, b: 0 };

#[derive(Debug, Clone, Copy, Default)]
pub struct DamageEffect;

#[derive(Debug, Clone)]
pub struct DamageState {
    zone: ZoneId,
    /// Committed value at trigger time, taken on restore
    original: Option<ZoneValue>,
    /// Off-beat intensity, ahead of ceiling scaling
    residual: u8,
}

impl Effect for DamageEffect {
    const ID: EffectId = EffectId::Damage;

    type ZoneState = DamageState;

    fn init_zone(&self, _slot: usize, zone: &Zone, _now: Timestamp, _noise: &mut Noise) -> DamageState {
        DamageState {
            zone: zone.id,
            original: None,
            residual: 0,
        }
    }

    fn start_zone(&self, state: &mut DamageState, zone: &Zone, outputs: &OutputSink) {
        state.original = outputs.value(zone.id);
        let ceiling = outputs.user_brightness(zone.id).unwrap_or(zone.max_brightness);
        state.residual = state.original.map_or(0, |value| {
            scale8(unscale_ceiling(value.brightness, ceiling), RESIDUAL_SCALE)
        });
    }

    fn render_zone(
        &self,
        state: &mut DamageState,
        _zone: &Zone,
        frame: &mut FrameContext<'_>,
    ) -> Option<Shade> {
        if frame.elapsed % FLICKER_INTERVAL_MS < FLICKER_ON_MS {
            let fade = if frame.duration == 0 {
                255
            } else {
                lerp8(255, 0, frame.elapsed, frame.duration)
            };
            return Some(Shade::new(scale8(DAMAGE_BRIGHTNESS, fade), ALERT_COLOR));
        }

        // Without a capture there is nothing to dim toward.
        let original = state.original?;
        Some(Shade::new(
            state.residual,
            scale_color(original.color, RESIDUAL_COLOR_SCALE),
        ))
    }

    /// Keep the capture: a re-trigger extends the alert, the zone still goes
    /// back to what it showed before the first one.
    fn restart_zone(
        &self,
        _state: &mut DamageState,
        _slot: usize,
        _zone: &Zone,
        _now: Timestamp,
        _noise: &mut Noise,
    ) {
    }

    fn finish_zone(&self, state: &mut DamageState, outputs: &mut OutputSink) {
        if let Some(value) = state.original.take() {
            outputs.restore(state.zone, value);
        }
    }
}
