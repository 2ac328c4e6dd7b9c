//! Scene configuration: which effect runs, where, for how long and with which
//! audio cue.

use embassy_time::Duration;
use heapless::Vec;

use crate::arbiter::Tier;
use crate::effect::EffectId;
use crate::zone::{Name, name};

/// Maximum number of configured scenes
pub const MAX_SCENES: usize = 16;

/// Maximum number of groups a scene can target
pub const MAX_TARGET_GROUPS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    /// Scene name, e.g. `"MachineGun"`
    pub name: Name,
    /// Animation the scene runs
    pub effect: EffectId,
    /// Picks the scenes started as ambient; arbitration always goes by
    /// [`EffectId::tier`]
    pub tier: Tier,
    pub target_groups: Vec<Name, MAX_TARGET_GROUPS>,
    /// Audio file number, `None` for silent scenes
    pub audio_file: Option<u16>,
    /// Zero means infinite
    pub duration: Duration,
}

impl SceneConfig {
    /// Create a scene with the effect's own tier, no targets and no audio
    pub fn new(scene_name: &str, effect: EffectId) -> Self {
        Self {
            name: name(scene_name),
            effect,
            tier: effect.tier(),
            target_groups: Vec::new(),
            audio_file: None,
            duration: Duration::from_millis(0),
        }
    }

    /// Add a target group; duplicates and groups beyond capacity are ignored
    #[must_use]
    pub fn with_target_group(mut self, group: &str) -> Self {
        if !self.target_groups.iter().any(|existing| existing.as_str() == group) {
            let _ = self.target_groups.push(name(group));
        }
        self
    }

    #[must_use]
    pub fn with_audio(mut self, file: u16) -> Self {
        self.audio_file = (file > 0).then_some(file);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Override the scene tier.
    ///
    /// Only `Tier::Ambient` changes behavior: the scene then starts with
    /// `begin` and `enable_ambient`. Suppression still follows the effect's
    /// own tier.
    #[must_use]
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub const fn is_ambient(&self) -> bool {
        matches!(self.tier, Tier::Ambient)
    }

    pub const fn has_audio(&self) -> bool {
        self.audio_file.is_some()
    }

    pub fn is_infinite(&self) -> bool {
        self.duration.as_millis() == 0
    }
}

/// Read access to scene configuration
pub trait SceneStore {
    fn scenes(&self) -> &[SceneConfig];

    fn scene(&self, scene_name: &str) -> Option<&SceneConfig> {
        self.scenes()
            .iter()
            .find(|scene| scene.name.as_str() == scene_name)
    }
}

/// In-memory scene table
#[derive(Debug, Clone, Default)]
pub struct SceneTable {
    scenes: Vec<SceneConfig, MAX_SCENES>,
}

impl SceneTable {
    pub const fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    /// Insert a scene, replacing any scene with the same name.
    ///
    /// Returns the scene if the table is full.
    pub fn add(&mut self, scene: SceneConfig) -> Result<(), SceneConfig> {
        if let Some(existing) = self
            .scenes
            .iter_mut()
            .find(|existing| existing.name == scene.name)
        {
            *existing = scene;
            return Ok(());
        }
        self.scenes.push(scene)
    }

    pub fn remove(&mut self, scene_name: &str) -> Option<SceneConfig> {
        let index = self
            .scenes
            .iter()
            .position(|scene| scene.name.as_str() == scene_name)?;
        Some(self.scenes.remove(index))
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl SceneStore for SceneTable {
    fn scenes(&self) -> &[SceneConfig] {
        &self.scenes
    }
}
