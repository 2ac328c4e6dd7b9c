//! Effect engine - the composition root and control surface.
//!
//! Owns the zone model, scene store, hardware driver, every effect instance,
//! the arbiter and the output sink. Nothing here blocks: the caller drives
//! time through [`EffectEngine::update`].

use core::fmt;

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::arbiter::{ArbiterEdge, PriorityArbiter, Tier};
use crate::effect::{EFFECT_COUNT, EffectId, EffectSlot};
use crate::log::log;
use crate::output::{OutputSink, ZoneDriver};
use crate::scene::{MAX_SCENES, SceneStore};
use crate::timer::Timestamp;
use crate::zone::{MAX_ZONES, Name, ZoneId, ZoneModel};

/// Configuration for the effect engine
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Seed for every effect's noise source
    pub seed: u64,
    /// Run candle flicker on all zones when no scene is configured
    pub default_ambient: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_1e57_ba77_1e00,
            default_ambient: true,
        }
    }
}

/// Error returned by the engine's control operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Neither a scene nor a catalog effect has this name
    UnknownEffect,
    /// The name resolved, but no zone matches its targets
    NoTargetZones,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEffect => write!(f, "unknown effect"),
            Self::NoTargetZones => write!(f, "no target zones"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectStatus {
    pub id: EffectId,
    pub enabled: bool,
    pub tier: Tier,
}

impl EffectStatus {
    pub const fn name(&self) -> &'static str {
        self.id.as_str()
    }
}

/// Snapshot of every effect, for status displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineStatus {
    pub effects: [EffectStatus; EFFECT_COUNT],
    /// Global effect currently holding the lower tiers down
    pub current_global: Option<EffectId>,
}

/// What a name resolves to
struct Resolved {
    effect: EffectId,
    /// Empty means every zone, tracked as the model changes
    targets: Vec<ZoneId, MAX_ZONES>,
    duration: Duration,
}

pub struct EffectEngine<Z: ZoneModel, S: SceneStore, D: ZoneDriver> {
    zones: Z,
    scenes: S,
    driver: D,
    config: EngineConfig,

    effects: [EffectSlot; EFFECT_COUNT],
    arbiter: PriorityArbiter,
    outputs: OutputSink,
    /// Time of the last `begin` or `update`
    clock: Timestamp,
}

impl<Z: ZoneModel, S: SceneStore, D: ZoneDriver> EffectEngine<Z, S, D> {
    pub fn new(zones: Z, scenes: S, driver: D, config: &EngineConfig) -> Self {
        let mut outputs = OutputSink::new();
        outputs.sync(zones.all_zones());
        Self {
            zones,
            scenes,
            driver,
            config: *config,
            effects: EffectId::ALL.map(|id| id.to_slot(config.seed)),
            arbiter: PriorityArbiter::new(),
            outputs,
            clock: Timestamp::default(),
        }
    }

    /// Reset every effect and start the ambient scenes
    pub fn begin(&mut self, now: Instant) {
        self.clock = Timestamp::from(now);
        self.arbiter.clear();
        for effect in &mut self.effects {
            effect.begin();
        }
        self.outputs.sync(self.zones.all_zones());

        let started = self.start_ambient();
        log!(
            "[EffectEngine] started: {} zone(s), {} scene(s), {} ambient",
            self.zones.all_zones().len(),
            self.scenes.scenes().len(),
            started
        );
    }

    /// Advance one tick.
    ///
    /// Returns the number of zones written to the driver.
    pub fn update(&mut self, now: Instant) -> usize {
        let now = Timestamp::from(now);
        self.clock = now;
        self.outputs.sync(self.zones.all_zones());

        if let Some(edge) = self.arbiter.resolve(&mut self.effects, &mut self.outputs) {
            match edge {
                ArbiterEdge::Acquired(id) => {
                    log!("[EffectEngine] {} took over, lower tiers suspended", id.as_str());
                }
                ArbiterEdge::Released(id) => {
                    log!("[EffectEngine] {} ended, lower tiers resumed", id.as_str());
                }
                ArbiterEdge::Handoff { from, to } => {
                    log!("[EffectEngine] {} handed over to {}", from.as_str(), to.as_str());
                }
            }
        }

        let zones = self.zones.all_zones();
        for effect in &mut self.effects {
            effect.update(now, zones, &mut self.outputs);
        }

        for effect in &mut self.effects {
            if effect.should_stop(now) {
                log!("[EffectEngine] {} expired", effect.name());
                effect.stop(&mut self.outputs);
            }
        }

        self.outputs.flush(&mut self.driver)
    }

    /// Start an effect by scene or effect name.
    ///
    /// A zero `duration` falls back to the scene's configured duration
    /// (itself zero, meaning run until stopped, for bare effect names).
    pub fn trigger_effect(
        &mut self,
        name: &str,
        duration: Duration,
        now: Instant,
    ) -> Result<EffectId, EngineError> {
        let now = Timestamp::from(now);
        let resolved = self.resolve(name).inspect_err(|err| {
            log!("[EffectEngine] trigger {} failed: {}", name, err);
        })?;
        let duration = if duration.as_millis() == 0 {
            resolved.duration
        } else {
            duration
        };

        let zones = self.zones.all_zones();
        if let Some(effect) = self.effects.get_mut(resolved.effect.index()) {
            effect.trigger(&resolved.targets, duration, now, zones, &mut self.outputs);
        }
        log!(
            "[EffectEngine] {} -> {} ({} ms)",
            name,
            resolved.effect.as_str(),
            duration.as_millis()
        );
        Ok(resolved.effect)
    }

    /// Run an effect until stopped; no-op if it is already running
    pub fn enable_effect(&mut self, name: &str) -> Result<EffectId, EngineError> {
        let id = self.lookup(name)?;
        if self.slot(id).is_some_and(EffectSlot::is_enabled) {
            return Ok(id);
        }
        let resolved = self.resolve(name)?;
        let zones = self.zones.all_zones();
        if let Some(effect) = self.effects.get_mut(id.index()) {
            effect.trigger(
                &resolved.targets,
                Duration::from_millis(0),
                self.clock,
                zones,
                &mut self.outputs,
            );
        }
        Ok(id)
    }

    /// Stop an effect; it will not resume when a Global effect ends
    pub fn disable_effect(&mut self, name: &str) -> Result<EffectId, EngineError> {
        let id = self.lookup(name)?;
        self.stop_index(id.index());
        Ok(id)
    }

    pub fn is_effect_enabled(&self, name: &str) -> bool {
        self.lookup(name)
            .ok()
            .and_then(|id| self.slot(id))
            .is_some_and(EffectSlot::is_enabled)
    }

    /// Start the ambient scenes (or the default candle).
    ///
    /// Returns the number of effects started.
    pub fn enable_ambient(&mut self) -> usize {
        self.start_ambient()
    }

    pub fn disable_ambient(&mut self) {
        self.stop_tier(Tier::Ambient);
    }

    pub fn stop_active(&mut self) {
        self.stop_tier(Tier::Active);
    }

    /// Stop Global effects and resume whatever they suppressed right away
    pub fn stop_global(&mut self) {
        self.stop_tier(Tier::Global);
        self.arbiter.release(&mut self.effects, &mut self.outputs);
    }

    pub fn stop_all(&mut self) {
        for effect in &mut self.effects {
            effect.stop(&mut self.outputs);
        }
        self.arbiter.clear();
        log!("[EffectEngine] all effects stopped");
    }

    /// Catalog names in registration order
    pub fn effect_names(&self) -> [&'static str; EFFECT_COUNT] {
        EffectId::ALL.map(EffectId::as_str)
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            effects: self.effects.each_ref().map(|effect| EffectStatus {
                id: effect.id(),
                enabled: effect.is_enabled(),
                tier: effect.tier(),
            }),
            current_global: self.arbiter.current().and_then(EffectId::from_index),
        }
    }

    /// Set a zone's user brightness ceiling
    ///
    /// Returns `false` for unknown zones.
    pub fn set_zone_brightness(&mut self, zone: ZoneId, ceiling: u8) -> bool {
        self.outputs.sync(self.zones.all_zones());
        self.outputs.set_user_brightness(zone, ceiling)
    }

    pub fn effect(&self, id: EffectId) -> Option<&EffectSlot> {
        self.slot(id)
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn zones(&self) -> &Z {
        &self.zones
    }

    pub const fn zones_mut(&mut self) -> &mut Z {
        &mut self.zones
    }

    pub const fn scenes(&self) -> &S {
        &self.scenes
    }

    pub const fn scenes_mut(&mut self) -> &mut S {
        &mut self.scenes
    }

    pub const fn outputs(&self) -> &OutputSink {
        &self.outputs
    }

    pub const fn outputs_mut(&mut self) -> &mut OutputSink {
        &mut self.outputs
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn slot(&self, id: EffectId) -> Option<&EffectSlot> {
        self.effects.get(id.index())
    }

    /// Effect behind a scene or effect name
    fn lookup(&self, name: &str) -> Result<EffectId, EngineError> {
        self.scenes
            .scene(name)
            .map(|scene| scene.effect)
            .or_else(|| EffectId::parse_from_str(name))
            .ok_or(EngineError::UnknownEffect)
    }

    fn resolve(&self, name: &str) -> Result<Resolved, EngineError> {
        if let Some(scene) = self.scenes.scene(name) {
            let mut targets = Vec::new();
            for group in &scene.target_groups {
                for zone in self.zones.zones_in_group(group.as_str()) {
                    if !targets.contains(&zone.id) {
                        let _ = targets.push(zone.id);
                    }
                }
            }
            let unresolved = if scene.target_groups.is_empty() {
                self.zones.all_zones().is_empty()
            } else {
                targets.is_empty()
            };
            if unresolved {
                return Err(EngineError::NoTargetZones);
            }
            return Ok(Resolved {
                effect: scene.effect,
                targets,
                duration: scene.duration,
            });
        }

        let effect = EffectId::parse_from_str(name).ok_or(EngineError::UnknownEffect)?;
        if self.zones.all_zones().is_empty() {
            return Err(EngineError::NoTargetZones);
        }
        Ok(Resolved {
            effect,
            targets: Vec::new(),
            duration: Duration::from_millis(0),
        })
    }

    fn start_ambient(&mut self) -> usize {
        let ambient: Vec<Name, MAX_SCENES> = self
            .scenes
            .scenes()
            .iter()
            .filter(|scene| scene.is_ambient())
            .map(|scene| scene.name.clone())
            .collect();

        let mut started = 0;
        let now = Instant::from_millis(u64::from(self.clock.as_millis()));
        for name in &ambient {
            if self.trigger_effect(name, Duration::from_millis(0), now).is_ok() {
                started += 1;
            }
        }

        if self.scenes.scenes().is_empty() && self.config.default_ambient {
            if self
                .trigger_effect(EffectId::Candle.as_str(), Duration::from_millis(0), now)
                .is_ok()
            {
                started += 1;
            }
        }
        started
    }

    fn stop_tier(&mut self, tier: Tier) {
        for index in 0..self.effects.len() {
            if self.effects.get(index).is_some_and(|effect| effect.tier() == tier) {
                self.stop_index(index);
            }
        }
        log!("[EffectEngine] {} effects stopped", tier.as_str());
    }

    fn stop_index(&mut self, index: usize) {
        if let Some(effect) = self.effects.get_mut(index) {
            effect.stop(&mut self.outputs);
        }
        self.arbiter.forget(index);
    }
}
