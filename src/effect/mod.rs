//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait and is driven by an [`Animator`]
//! that owns its lifecycle and per-zone state.

mod animator;
mod candle;
mod damage;
mod destroyed;
mod engine_idle;
mod engine_rev;
mod flamethrower;
mod noise;
pub mod phase;
mod rocket_launcher;
mod victory;
mod weapon_fire;

use core::fmt;

use embassy_time::Duration;

pub use animator::Animator;
pub use candle::{CandleEffect, FlickerState};
pub use damage::{DamageEffect, DamageState};
pub use destroyed::{DestroyedEffect, DestructionState};
pub use engine_idle::{EngineIdleEffect, IdleState};
pub use engine_rev::{EngineRevEffect, RevState};
pub use flamethrower::{FlameState, FlamethrowerEffect};
pub use noise::Noise;
pub use rocket_launcher::{LaunchState, RocketLauncherEffect};
pub use victory::{VictoryEffect, victory_shade};
pub use weapon_fire::{BURST_MS, FirePattern, WeaponFireEffect, flash_brightness};

use crate::arbiter::Tier;
use crate::output::{OutputSink, Shade};
use crate::timer::{Timestamp, TriggerTimer};
use crate::zone::{Zone, ZoneId};

const EFFECT_NAME_CANDLE: &str = "CandleFlicker";
const EFFECT_NAME_ENGINE_IDLE: &str = "EngineIdle";
const EFFECT_NAME_WEAPON_FIRE: &str = "WeaponFire";
const EFFECT_NAME_ENGINE_REV: &str = "EngineRev";
const EFFECT_NAME_FLAMETHROWER: &str = "Flamethrower";
const EFFECT_NAME_ROCKET_LAUNCHER: &str = "RocketLauncher";
const EFFECT_NAME_VICTORY: &str = "Victory";
const EFFECT_NAME_DAMAGE: &str = "Damage";
const EFFECT_NAME_DESTROYED: &str = "Destroyed";

const EFFECT_ID_CANDLE: u8 = 0;
const EFFECT_ID_ENGINE_IDLE: u8 = 1;
const EFFECT_ID_WEAPON_FIRE: u8 = 2;
const EFFECT_ID_ENGINE_REV: u8 = 3;
const EFFECT_ID_FLAMETHROWER: u8 = 4;
const EFFECT_ID_ROCKET_LAUNCHER: u8 = 5;
const EFFECT_ID_VICTORY: u8 = 6;
const EFFECT_ID_DAMAGE: u8 = 7;
const EFFECT_ID_DESTROYED: u8 = 8;

/// Number of effects in the catalog
pub const EFFECT_COUNT: usize = 9;

/// Per-tick inputs shared by every zone an effect renders
pub struct FrameContext<'a> {
    pub now: Timestamp,
    /// Milliseconds since the last trigger
    pub elapsed: u32,
    /// Trigger duration in milliseconds, zero for continuous
    pub duration: u32,
    pub noise: &'a mut Noise,
}

pub trait Effect: Clone + fmt::Debug {
    const ID: EffectId;

    /// State kept for each target zone
    type ZoneState: Clone + fmt::Debug;

    /// Fresh state for the zone at position `slot` of the target list
    fn init_zone(&self, slot: usize, zone: &Zone, now: Timestamp, noise: &mut Noise)
    -> Self::ZoneState;

    /// Called once per zone when a trigger starts a new run
    fn start_zone(&self, _state: &mut Self::ZoneState, _zone: &Zone, _outputs: &OutputSink) {}

    /// Called once per zone when a running effect is triggered again on the
    /// same targets. The default starts the zone over from a fresh state.
    fn restart_zone(
        &self,
        state: &mut Self::ZoneState,
        slot: usize,
        zone: &Zone,
        now: Timestamp,
        noise: &mut Noise,
    ) {
        *state = self.init_zone(slot, zone, now, noise);
    }

    /// Render one zone; `None` leaves the zone untouched this tick
    fn render_zone(
        &self,
        state: &mut Self::ZoneState,
        zone: &Zone,
        frame: &mut FrameContext<'_>,
    ) -> Option<Shade>;

    /// Check if the effect has played to its natural end
    fn is_finished(&self, _elapsed: u32) -> bool {
        false
    }

    /// Called once per zone when the effect goes from enabled to disabled
    fn finish_zone(&self, _state: &mut Self::ZoneState, _outputs: &mut OutputSink) {}
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EffectId {
    Candle = EFFECT_ID_CANDLE,
    EngineIdle = EFFECT_ID_ENGINE_IDLE,
    WeaponFire = EFFECT_ID_WEAPON_FIRE,
    EngineRev = EFFECT_ID_ENGINE_REV,
    Flamethrower = EFFECT_ID_FLAMETHROWER,
    RocketLauncher = EFFECT_ID_ROCKET_LAUNCHER,
    Victory = EFFECT_ID_VICTORY,
    Damage = EFFECT_ID_DAMAGE,
    Destroyed = EFFECT_ID_DESTROYED,
}

impl EffectId {
    /// Catalog in registration order
    pub const ALL: [Self; EFFECT_COUNT] = [
        Self::Candle,
        Self::EngineIdle,
        Self::WeaponFire,
        Self::EngineRev,
        Self::Flamethrower,
        Self::RocketLauncher,
        Self::Victory,
        Self::Damage,
        Self::Destroyed,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_CANDLE => Self::Candle,
            EFFECT_ID_ENGINE_IDLE => Self::EngineIdle,
            EFFECT_ID_WEAPON_FIRE => Self::WeaponFire,
            EFFECT_ID_ENGINE_REV => Self::EngineRev,
            EFFECT_ID_FLAMETHROWER => Self::Flamethrower,
            EFFECT_ID_ROCKET_LAUNCHER => Self::RocketLauncher,
            EFFECT_ID_VICTORY => Self::Victory,
            EFFECT_ID_DAMAGE => Self::Damage,
            EFFECT_ID_DESTROYED => Self::Destroyed,
            _ => return None,
        })
    }

    /// Effect at a catalog position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog position of this effect
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn tier(self) -> Tier {
        match self {
            Self::Candle | Self::EngineIdle => Tier::Ambient,
            Self::WeaponFire
            | Self::EngineRev
            | Self::Flamethrower
            | Self::RocketLauncher
            | Self::Victory => Tier::Active,
            Self::Damage | Self::Destroyed => Tier::Global,
        }
    }

    /// Build the animator for this effect, seeding its noise from `seed`
    pub fn to_slot(self, seed: u64) -> EffectSlot {
        let seed = seed ^ (u64::from(self as u8) + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        match self {
            Self::Candle => EffectSlot::Candle(Animator::new(CandleEffect, seed)),
            Self::EngineIdle => EffectSlot::EngineIdle(Animator::new(EngineIdleEffect, seed)),
            Self::WeaponFire => EffectSlot::WeaponFire(Animator::new(WeaponFireEffect, seed)),
            Self::EngineRev => EffectSlot::EngineRev(Animator::new(EngineRevEffect, seed)),
            Self::Flamethrower => {
                EffectSlot::Flamethrower(Animator::new(FlamethrowerEffect, seed))
            }
            Self::RocketLauncher => {
                EffectSlot::RocketLauncher(Animator::new(RocketLauncherEffect, seed))
            }
            Self::Victory => EffectSlot::Victory(Animator::new(VictoryEffect, seed)),
            Self::Damage => EffectSlot::Damage(Animator::new(DamageEffect, seed)),
            Self::Destroyed => EffectSlot::Destroyed(Animator::new(DestroyedEffect, seed)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candle => EFFECT_NAME_CANDLE,
            Self::EngineIdle => EFFECT_NAME_ENGINE_IDLE,
            Self::WeaponFire => EFFECT_NAME_WEAPON_FIRE,
            Self::EngineRev => EFFECT_NAME_ENGINE_REV,
            Self::Flamethrower => EFFECT_NAME_FLAMETHROWER,
            Self::RocketLauncher => EFFECT_NAME_ROCKET_LAUNCHER,
            Self::Victory => EFFECT_NAME_VICTORY,
            Self::Damage => EFFECT_NAME_DAMAGE,
            Self::Destroyed => EFFECT_NAME_DESTROYED,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_CANDLE => Some(Self::Candle),
            EFFECT_NAME_ENGINE_IDLE => Some(Self::EngineIdle),
            EFFECT_NAME_WEAPON_FIRE => Some(Self::WeaponFire),
            EFFECT_NAME_ENGINE_REV => Some(Self::EngineRev),
            EFFECT_NAME_FLAMETHROWER => Some(Self::Flamethrower),
            EFFECT_NAME_ROCKET_LAUNCHER => Some(Self::RocketLauncher),
            EFFECT_NAME_VICTORY => Some(Self::Victory),
            EFFECT_NAME_DAMAGE => Some(Self::Damage),
            EFFECT_NAME_DESTROYED => Some(Self::Destroyed),
            _ => None,
        }
    }
}

/// Effect slot - enum containing every animator in the catalog
#[derive(Debug, Clone)]
pub enum EffectSlot {
    Candle(Animator<CandleEffect>),
    EngineIdle(Animator<EngineIdleEffect>),
    WeaponFire(Animator<WeaponFireEffect>),
    EngineRev(Animator<EngineRevEffect>),
    Flamethrower(Animator<FlamethrowerEffect>),
    RocketLauncher(Animator<RocketLauncherEffect>),
    Victory(Animator<VictoryEffect>),
    Damage(Animator<DamageEffect>),
    Destroyed(Animator<DestroyedEffect>),
}

macro_rules! dispatch {
    ($slot:expr, $animator:ident => $body:expr) => {
        match $slot {
            EffectSlot::Candle($animator) => $body,
            EffectSlot::EngineIdle($animator) => $body,
            EffectSlot::WeaponFire($animator) => $body,
            EffectSlot::EngineRev($animator) => $body,
            EffectSlot::Flamethrower($animator) => $body,
            EffectSlot::RocketLauncher($animator) => $body,
            EffectSlot::Victory($animator) => $body,
            EffectSlot::Damage($animator) => $body,
            EffectSlot::Destroyed($animator) => $body,
        }
    };
}

impl EffectSlot {
    pub fn id(&self) -> EffectId {
        dispatch!(self, animator => animator.id())
    }

    pub fn name(&self) -> &'static str {
        self.id().as_str()
    }

    pub fn tier(&self) -> Tier {
        self.id().tier()
    }

    pub fn is_global(&self) -> bool {
        self.tier() == Tier::Global
    }

    pub fn is_enabled(&self) -> bool {
        dispatch!(self, animator => animator.is_enabled())
    }

    /// Flip the enabled flag; leaving the enabled state runs the finish hooks
    pub fn set_enabled(&mut self, enabled: bool, outputs: &mut OutputSink) {
        dispatch!(self, animator => animator.set_enabled(enabled, outputs));
    }

    /// Back to the power-on state: disabled, no targets, no zone state
    pub fn begin(&mut self) {
        dispatch!(self, animator => animator.begin());
    }

    /// Start or restart the effect on `targets` (empty means every zone)
    pub fn trigger(
        &mut self,
        targets: &[ZoneId],
        duration: Duration,
        now: Timestamp,
        zones: &[Zone],
        outputs: &mut OutputSink,
    ) {
        dispatch!(self, animator => animator.trigger(targets, duration, now, zones, outputs));
    }

    pub fn update(&mut self, now: Timestamp, zones: &[Zone], outputs: &mut OutputSink) {
        dispatch!(self, animator => animator.update(now, zones, outputs));
    }

    /// Disable and drop the trigger duration
    pub fn stop(&mut self, outputs: &mut OutputSink) {
        dispatch!(self, animator => animator.stop(outputs));
    }

    /// True once a timed run has used up its duration
    pub fn should_stop(&self, now: Timestamp) -> bool {
        dispatch!(self, animator => animator.should_stop(now))
    }

    pub fn timer(&self) -> &TriggerTimer {
        dispatch!(self, animator => animator.timer())
    }

    /// Explicit targets, empty when following every zone
    pub fn targets(&self) -> &[ZoneId] {
        dispatch!(self, animator => animator.targets())
    }

    /// Number of zones with allocated state
    pub fn zone_count(&self) -> usize {
        dispatch!(self, animator => animator.zone_count())
    }
}
