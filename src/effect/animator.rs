use embassy_time::Duration;
use heapless::Vec;

use super::{Effect, EffectId, FrameContext, Noise};
use crate::log::log;
use crate::output::OutputSink;
use crate::timer::{Timestamp, TriggerTimer};
use crate::zone::{MAX_ZONES, Zone, ZoneId};

/// Lifecycle driver shared by every effect.
///
/// Owns the enabled flag, the trigger clock, the target list and one
/// [`Effect::ZoneState`] per resolved zone. An empty target list follows
/// every zone in the model, so zones added or removed later are picked up
/// on the next update.
#[derive(Debug, Clone)]
pub struct Animator<E: Effect> {
    effect: E,
    enabled: bool,
    timer: TriggerTimer,
    targets: Vec<ZoneId, MAX_ZONES>,
    states: Vec<(ZoneId, E::ZoneState), MAX_ZONES>,
    noise: Noise,
}

impl<E: Effect> Animator<E> {
    pub const fn new(effect: E, seed: u64) -> Self {
        Self {
            effect,
            enabled: false,
            timer: TriggerTimer::new(),
            targets: Vec::new(),
            states: Vec::new(),
            noise: Noise::new(seed),
        }
    }

    pub const fn id(&self) -> EffectId {
        E::ID
    }

    pub const fn effect(&self) -> &E {
        &self.effect
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn timer(&self) -> &TriggerTimer {
        &self.timer
    }

    pub fn targets(&self) -> &[ZoneId] {
        &self.targets
    }

    pub fn zone_count(&self) -> usize {
        self.states.len()
    }

    pub fn begin(&mut self) {
        self.enabled = false;
        self.timer = TriggerTimer::new();
        self.targets.clear();
        self.states.clear();
    }

    pub fn set_enabled(&mut self, enabled: bool, outputs: &mut OutputSink) {
        if self.enabled == enabled {
            return;
        }
        if !enabled {
            self.finish(outputs);
        }
        self.enabled = enabled;
        log!(
            "[{}] {}",
            E::ID.as_str(),
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Start a run at `now`.
    ///
    /// Re-triggering a running effect on the same targets restarts the clock
    /// and hands every zone to [`Effect::restart_zone`].
    pub fn trigger(
        &mut self,
        targets: &[ZoneId],
        duration: Duration,
        now: Timestamp,
        zones: &[Zone],
        outputs: &mut OutputSink,
    ) {
        let retarget = self.targets.as_slice() != targets;
        if self.enabled && retarget {
            self.finish(outputs);
        }

        if !self.enabled || retarget {
            self.targets.clear();
            for &id in targets.iter().take(MAX_ZONES) {
                let _ = self.targets.push(id);
            }
            let resolved = resolve_targets(&self.targets, zones);
            self.reset_states(&resolved, now);
            for ((_, state), zone) in self.states.iter_mut().zip(resolved.iter()) {
                self.effect.start_zone(state, zone, outputs);
            }
        } else {
            let resolved = resolve_targets(&self.targets, zones);
            self.resync(&resolved, now, outputs);
            for (slot, ((_, state), zone)) in
                self.states.iter_mut().zip(resolved.iter()).enumerate()
            {
                self.effect.restart_zone(state, slot, zone, now, &mut self.noise);
            }
        }

        self.timer.trigger(now, duration);
        self.enabled = true;
        log!(
            "[{}] triggered on {} zone(s) for {} ms",
            E::ID.as_str(),
            self.states.len(),
            self.timer.duration_ms()
        );
    }

    pub fn update(&mut self, now: Timestamp, zones: &[Zone], outputs: &mut OutputSink) {
        if !self.enabled {
            return;
        }

        let resolved = resolve_targets(&self.targets, zones);
        self.resync(&resolved, now, outputs);

        let elapsed = self.timer.elapsed(now);
        let mut frame = FrameContext {
            now,
            elapsed,
            duration: self.timer.duration_ms(),
            noise: &mut self.noise,
        };
        for ((_, state), zone) in self.states.iter_mut().zip(resolved.iter()) {
            if !zone.enabled {
                continue;
            }
            if let Some(shade) = self.effect.render_zone(state, zone, &mut frame) {
                outputs.apply(zone, shade);
            }
        }

        if self.effect.is_finished(elapsed) {
            log!("[{}] sequence complete", E::ID.as_str());
            self.stop(outputs);
        }
    }

    pub fn stop(&mut self, outputs: &mut OutputSink) {
        self.set_enabled(false, outputs);
        self.timer.clear();
    }

    pub const fn should_stop(&self, now: Timestamp) -> bool {
        self.enabled && self.timer.should_stop(now)
    }

    fn finish(&mut self, outputs: &mut OutputSink) {
        for (_, state) in &mut self.states {
            self.effect.finish_zone(state, outputs);
        }
    }

    /// Follow a changed zone set.
    ///
    /// Zones still present keep their state; new zones get a fresh state and
    /// a `start_zone` call.
    fn resync(&mut self, zones: &[&Zone], now: Timestamp, outputs: &OutputSink) {
        let in_sync = self.states.len() == zones.len()
            && self
                .states
                .iter()
                .zip(zones.iter())
                .all(|((id, _), zone)| *id == zone.id);
        if in_sync {
            return;
        }
        log!(
            "[{}] zone set changed: {} -> {}",
            E::ID.as_str(),
            self.states.len(),
            zones.len()
        );

        let mut previous = core::mem::take(&mut self.states);
        for (slot, zone) in zones.iter().enumerate() {
            let kept = previous
                .iter()
                .position(|(id, _)| *id == zone.id)
                .map(|index| previous.swap_remove(index).1);
            let state = kept.unwrap_or_else(|| {
                let mut state = self.effect.init_zone(slot, zone, now, &mut self.noise);
                self.effect.start_zone(&mut state, zone, outputs);
                state
            });
            let _ = self.states.push((zone.id, state));
        }
    }

    fn reset_states(&mut self, zones: &[&Zone], now: Timestamp) {
        self.states.clear();
        for (slot, zone) in zones.iter().enumerate() {
            let state = self.effect.init_zone(slot, zone, now, &mut self.noise);
            let _ = self.states.push((zone.id, state));
        }
    }
}

/// Zones an effect renders, in target order; empty targets mean all zones
fn resolve_targets<'z>(targets: &[ZoneId], zones: &'z [Zone]) -> Vec<&'z Zone, MAX_ZONES> {
    if targets.is_empty() {
        return zones.iter().take(MAX_ZONES).collect();
    }
    targets
        .iter()
        .filter_map(|id| zones.iter().find(|zone| zone.id == *id))
        .collect()
}
