use super::{Effect, EffectId, FrameContext, Noise};
use crate::color::{BLACK, Rgb};
use crate::output::Shade;
use crate::timer::Timestamp;
use crate::zone::Zone;

const FLASH_INTERVAL_MS: u32 = 50;
const FLASH_ON_MS: u32 = FLASH_INTERVAL_MS / 2;
const MAX_FLASHES: u32 = 8;
const FLASH_BRIGHTNESS: u8 = 255;
/// Burst length; the effect stops itself here
pub const BURST_MS: u32 = FLASH_INTERVAL_MS * MAX_FLASHES;

const MUZZLE_COLOR: Rgb = Rgb {
    r: 255,
    g: 200,
    b: 100,
};

/// Brightness profile of a burst, picked per zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePattern {
    /// Every flash at full brightness
    Full,
    /// Every flash at 80 %
    Dimmed,
    /// Odd flashes full, even flashes at 60 %
    Alternating,
    /// Each flash 20 lower than the previous one
    Diminishing,
}

impl FirePattern {
    pub const ALL: [Self; 4] = [Self::Full, Self::Dimmed, Self::Alternating, Self::Diminishing];
}

/// Brightness of a burst `elapsed` ms after the trigger.
///
/// Flash `k` occupies `k * 50 .. k * 50 + 25`; everything else, including
/// anything at or past the end of the burst, is dark.
#[allow(clippy::cast_possible_truncation)]
pub const fn flash_brightness(pattern: FirePattern, elapsed: u32) -> u8 {
    let flash = elapsed / FLASH_INTERVAL_MS;
    if flash >= MAX_FLASHES || elapsed % FLASH_INTERVAL_MS >= FLASH_ON_MS {
        return 0;
    }
    match pattern {
        FirePattern::Full => FLASH_BRIGHTNESS,
        FirePattern::Dimmed => 204,
        FirePattern::Alternating => {
            if flash % 2 == 1 {
                FLASH_BRIGHTNESS
            } else {
                153
            }
        }
        FirePattern::Diminishing => FLASH_BRIGHTNESS.saturating_sub((flash * 20) as u8),
    }
}

/// Rapid muzzle flashes: eight 50 ms beats, lit for the first half of each
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponFireEffect;

impl Effect for WeaponFireEffect {
    const ID: EffectId = EffectId::WeaponFire;

    type ZoneState = FirePattern;

    #[allow(clippy::cast_possible_truncation)]
    fn init_zone(&self, _slot: usize, _zone: &Zone, _now: Timestamp, noise: &mut Noise) -> FirePattern {
        let pick = noise.range_u32(0, FirePattern::ALL.len() as u32) as usize;
        FirePattern::ALL.get(pick).copied().unwrap_or(FirePattern::Full)
    }

    fn render_zone(
        &self,
        pattern: &mut FirePattern,
        _zone: &Zone,
        frame: &mut FrameContext<'_>,
    ) -> Option<Shade> {
        let brightness = flash_brightness(*pattern, frame.elapsed);
        if brightness == 0 {
            return Some(Shade::new(0, BLACK));
        }
        Some(Shade::new(brightness, MUZZLE_COLOR))
    }

    fn is_finished(&self, elapsed: u32) -> bool {
        elapsed >= BURST_MS
    }
}
