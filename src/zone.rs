//! Zones and groups.
//!
//! A zone is one physical output channel: a single PWM LED or a run of
//! addressable pixels. Groups are not stored separately; a zone names its
//! group and group membership is derived by lookup.

use core::fmt;

use heapless::{String, Vec};

/// Unique zone identifier
pub type ZoneId = u8;

/// Maximum number of zones (one per PWM channel of the target MCU).
pub const MAX_ZONES: usize = 16;

/// Maximum length of zone group and scene names, in bytes.
pub const NAME_LEN: usize = 24;

/// Fixed-capacity name used for groups and scenes
pub type Name = String<NAME_LEN>;

/// Build a [`Name`], truncating at a char boundary if `value` is too long.
pub fn name(value: &str) -> Name {
    let mut out = Name::new();
    for ch in value.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Output hardware behind a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    /// Single-channel brightness (PWM LED)
    Single,
    /// Addressable RGB pixel run
    Pixels,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    /// GPIO or pixel bus the zone drives
    pub output: u8,
    pub kind: ZoneKind,
    /// Number of pixels, 1 for single-channel zones
    pub pixel_count: u16,
    pub group: Name,
    /// Brightness ceiling (0-255)
    pub max_brightness: u8,
    pub enabled: bool,
}

impl Zone {
    /// Create an enabled single-channel zone
    pub fn single(id: ZoneId, output: u8, group: &str) -> Self {
        Self {
            id,
            output,
            kind: ZoneKind::Single,
            pixel_count: 1,
            group: name(group),
            max_brightness: 255,
            enabled: true,
        }
    }

    /// Create an enabled addressable pixel zone
    pub fn pixels(id: ZoneId, output: u8, pixel_count: u16, group: &str) -> Self {
        Self {
            id,
            output,
            kind: ZoneKind::Pixels,
            pixel_count: pixel_count.max(1),
            group: name(group),
            max_brightness: 255,
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_max_brightness(mut self, max_brightness: u8) -> Self {
        self.max_brightness = max_brightness;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.group.as_str() == group
    }
}

/// Read access to the zone configuration
pub trait ZoneModel {
    /// All zones, ordered by id
    fn all_zones(&self) -> &[Zone];

    fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.all_zones().iter().find(|zone| zone.id == id)
    }

    fn zones_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Zone> + 'a {
        self.all_zones().iter().filter(move |zone| zone.in_group(group))
    }
}

/// Error returned when a zone cannot be added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneError {
    /// Another zone already drives this output
    OutputInUse { output: u8, owner: ZoneId },
    /// The table is at [`MAX_ZONES`]
    Full,
}

impl fmt::Display for ZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputInUse { output, owner } => {
                write!(f, "output {output} already used by zone {owner}")
            }
            Self::Full => write!(f, "zone table is full"),
        }
    }
}

/// In-memory zone table
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    zones: Vec<Zone, MAX_ZONES>,
}

impl ZoneTable {
    pub const fn new() -> Self {
        Self { zones: Vec::new() }
    }

    /// Insert a zone, replacing any zone with the same id.
    ///
    /// Fails if a different zone already drives the same output.
    pub fn add(&mut self, zone: Zone) -> Result<(), ZoneError> {
        if let Some(owner) = self
            .zones
            .iter()
            .find(|existing| existing.output == zone.output && existing.id != zone.id)
        {
            return Err(ZoneError::OutputInUse {
                output: zone.output,
                owner: owner.id,
            });
        }

        if let Some(existing) = self.zones.iter_mut().find(|existing| existing.id == zone.id) {
            *existing = zone;
            return Ok(());
        }

        let index = self
            .zones
            .iter()
            .position(|existing| existing.id > zone.id)
            .unwrap_or(self.zones.len());
        self.zones.insert(index, zone).map_err(|_| ZoneError::Full)
    }

    /// Remove a zone by id, returning it if present
    pub fn remove(&mut self, id: ZoneId) -> Option<Zone> {
        let index = self.zones.iter().position(|zone| zone.id == id)?;
        Some(self.zones.remove(index))
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|zone| zone.id == id)
    }

    /// Ids of the zones in `group`
    pub fn group_members(&self, group: &str) -> Vec<ZoneId, MAX_ZONES> {
        self.zones
            .iter()
            .filter(|zone| zone.in_group(group))
            .map(|zone| zone.id)
            .collect()
    }

    /// Distinct group names, in zone order
    pub fn group_names(&self) -> Vec<&str, MAX_ZONES> {
        let mut names: Vec<&str, MAX_ZONES> = Vec::new();
        for zone in &self.zones {
            if !names.contains(&zone.group.as_str()) {
                let _ = names.push(zone.group.as_str());
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl ZoneModel for ZoneTable {
    fn all_zones(&self) -> &[Zone] {
        &self.zones
    }
}
