//! Tier arbitration.
//!
//! While any Global effect is enabled, every Ambient and Active effect is
//! held disabled. The enabled flags seen on the rising edge are snapshotted
//! and put back on the falling edge.

use crate::effect::{EFFECT_COUNT, EffectId, EffectSlot};
use crate::log::log;
use crate::output::OutputSink;

/// Priority class of an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tier {
    /// Background loops, e.g. candle flicker
    Ambient = 0,
    /// Player-triggered one-shots
    Active = 1,
    /// System-wide takeover
    Global = 2,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::Active => "active",
            Self::Global => "global",
        }
    }
}

/// Transition reported by [`PriorityArbiter::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterEdge {
    /// A Global effect took over; lower tiers were suppressed
    Acquired(EffectId),
    /// The last Global effect ended; lower tiers were restored
    Released(EffectId),
    /// One Global effect ended while another was already running
    Handoff { from: EffectId, to: EffectId },
}

#[derive(Debug, Clone, Default)]
pub struct PriorityArbiter {
    /// Catalog index of the Global effect in control
    current: Option<usize>,
    /// Enabled flags of non-Global effects at the rising edge
    was_enabled: [bool; EFFECT_COUNT],
}

impl PriorityArbiter {
    pub const fn new() -> Self {
        Self {
            current: None,
            was_enabled: [false; EFFECT_COUNT],
        }
    }

    /// Catalog index of the Global effect in control
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    /// True if the effect at `index` was suppressed and will resume on release
    pub fn is_suppressed(&self, index: usize) -> bool {
        self.current.is_some() && self.was_enabled.get(index).copied().unwrap_or(false)
    }

    /// Enforce tier exclusion for this tick.
    ///
    /// The first enabled Global effect in catalog order wins.
    pub fn resolve(
        &mut self,
        effects: &mut [EffectSlot],
        outputs: &mut OutputSink,
    ) -> Option<ArbiterEdge> {
        let found = effects
            .iter()
            .position(|effect| effect.is_global() && effect.is_enabled());

        match (self.current, found) {
            (None, None) => None,
            (None, Some(index)) => {
                for (slot, effect) in effects.iter_mut().enumerate() {
                    if effect.is_global() {
                        continue;
                    }
                    if let Some(flag) = self.was_enabled.get_mut(slot) {
                        *flag = effect.is_enabled();
                    }
                    effect.set_enabled(false, outputs);
                }
                self.current = Some(index);
                let id = effects.get(index).map(EffectSlot::id)?;
                log!("[PriorityArbiter] {} acquired", id.as_str());
                Some(ArbiterEdge::Acquired(id))
            }
            (Some(previous), None) => {
                self.release_into(effects, outputs);
                let id = EffectId::from_index(previous)?;
                log!("[PriorityArbiter] {} released", id.as_str());
                Some(ArbiterEdge::Released(id))
            }
            (Some(previous), Some(index)) => {
                self.suppress_late(effects, outputs);
                if previous == index {
                    return None;
                }
                self.current = Some(index);
                let from = EffectId::from_index(previous)?;
                let to = effects.get(index).map(EffectSlot::id)?;
                log!(
                    "[PriorityArbiter] handoff {} -> {}",
                    from.as_str(),
                    to.as_str()
                );
                Some(ArbiterEdge::Handoff { from, to })
            }
        }
    }

    /// Falling edge now, regardless of Global state
    pub fn release(&mut self, effects: &mut [EffectSlot], outputs: &mut OutputSink) {
        if self.current.is_some() {
            self.release_into(effects, outputs);
        }
    }

    /// Drop the snapshot flag of one effect so it does not resume
    pub fn forget(&mut self, index: usize) {
        if let Some(flag) = self.was_enabled.get_mut(index) {
            *flag = false;
        }
    }

    /// Forget everything, without touching effects
    pub fn clear(&mut self) {
        self.current = None;
        self.was_enabled = [false; EFFECT_COUNT];
    }

    fn release_into(&mut self, effects: &mut [EffectSlot], outputs: &mut OutputSink) {
        self.current = None;
        for (slot, effect) in effects.iter_mut().enumerate() {
            if effect.is_global() {
                continue;
            }
            let resume = self.was_enabled.get(slot).copied().unwrap_or(false);
            effect.set_enabled(resume, outputs);
        }
        self.was_enabled = [false; EFFECT_COUNT];
    }

    /// Re-suppress effects enabled after the rising edge
    fn suppress_late(&mut self, effects: &mut [EffectSlot], outputs: &mut OutputSink) {
        for (slot, effect) in effects.iter_mut().enumerate() {
            if effect.is_global() || !effect.is_enabled() {
                continue;
            }
            log!(
                "[PriorityArbiter] {} suppressed until release",
                effect.id().as_str()
            );
            if let Some(flag) = self.was_enabled.get_mut(slot) {
                *flag = true;
            }
            effect.set_enabled(false, outputs);
        }
    }
}
