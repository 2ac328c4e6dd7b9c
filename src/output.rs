//! Zone output sink.
//!
//! Effects write into the sink during a tick; the sink coalesces the writes
//! and pushes each changed zone to the [`ZoneDriver`] once per flush. Reads
//! always return the last flushed value.

use heapless::Vec;

use crate::color::{BLACK, Rgb};
use crate::math8::scale_ceiling;
use crate::zone::{MAX_ZONES, Zone, ZoneId, ZoneKind};

/// Committed state of one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneValue {
    pub brightness: u8,
    pub color: Rgb,
}

impl ZoneValue {
    pub const OFF: Self = Self {
        brightness: 0,
        color: BLACK,
    };
}

impl Default for ZoneValue {
    fn default() -> Self {
        Self::OFF
    }
}

/// Intensity and color an effect wants on a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shade {
    pub intensity: u8,
    pub color: Rgb,
}

impl Shade {
    pub const fn new(intensity: u8, color: Rgb) -> Self {
        Self { intensity, color }
    }

    pub const fn off() -> Self {
        Self {
            intensity: 0,
            color: BLACK,
        }
    }
}

/// Hardware side of the sink
///
/// Implement this trait to drive PWM channels or pixel buses.
pub trait ZoneDriver {
    /// Push a committed value to the zone's hardware
    fn write(&mut self, zone: ZoneId, kind: ZoneKind, value: ZoneValue);
}

#[derive(Debug, Clone)]
struct ZoneSlot {
    id: ZoneId,
    kind: ZoneKind,
    /// User brightness ceiling
    ceiling: u8,
    /// Ceiling last seen in the zone model
    model_ceiling: u8,
    pending: ZoneValue,
    committed: ZoneValue,
    dirty: bool,
}

impl ZoneSlot {
    fn new(zone: &Zone) -> Self {
        Self {
            id: zone.id,
            kind: zone.kind,
            ceiling: zone.max_brightness,
            model_ceiling: zone.max_brightness,
            pending: ZoneValue::OFF,
            committed: ZoneValue::OFF,
            dirty: false,
        }
    }

    fn stage(&mut self, value: ZoneValue) {
        self.pending = value;
        self.dirty = self.pending != self.committed;
    }
}

/// Per-zone output state with deferred, coalesced hardware writes
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    slots: Vec<ZoneSlot, MAX_ZONES>,
}

impl OutputSink {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Follow the zone model: add new zones, drop removed ones.
    ///
    /// A changed `max_brightness` in the model replaces the user ceiling.
    pub fn sync(&mut self, zones: &[Zone]) {
        self.slots
            .retain(|slot| zones.iter().any(|zone| zone.id == slot.id));

        for zone in zones {
            match self.slot_mut(zone.id) {
                Some(slot) => {
                    slot.kind = zone.kind;
                    if slot.model_ceiling != zone.max_brightness {
                        slot.model_ceiling = zone.max_brightness;
                        slot.ceiling = zone.max_brightness;
                    }
                }
                None => {
                    let _ = self.slots.push(ZoneSlot::new(zone));
                }
            }
        }
    }

    /// Set the user brightness ceiling of a zone
    ///
    /// Returns `false` for unknown zones.
    pub fn set_user_brightness(&mut self, zone: ZoneId, ceiling: u8) -> bool {
        let Some(slot) = self.slot_mut(zone) else {
            return false;
        };
        slot.ceiling = ceiling;
        true
    }

    pub fn user_brightness(&self, zone: ZoneId) -> Option<u8> {
        self.slot(zone).map(|slot| slot.ceiling)
    }

    /// Stage an effect brightness, scaled by the zone ceiling
    pub fn set_brightness(&mut self, zone: ZoneId, brightness: u8) {
        let Some(slot) = self.slot_mut(zone) else {
            return;
        };
        let value = ZoneValue {
            brightness: scale_ceiling(brightness, slot.ceiling),
            color: slot.pending.color,
        };
        slot.stage(value);
    }

    /// Stage a color and effect brightness
    ///
    /// Single-channel zones ignore this call.
    pub fn set_color_and_brightness(&mut self, zone: ZoneId, color: Rgb, brightness: u8) {
        let Some(slot) = self.slot_mut(zone) else {
            return;
        };
        if slot.kind == ZoneKind::Single {
            return;
        }
        let value = ZoneValue {
            brightness: scale_ceiling(brightness, slot.ceiling),
            color,
        };
        slot.stage(value);
    }

    /// Stage a shade using the write matching the zone kind
    pub fn apply(&mut self, zone: &Zone, shade: Shade) {
        match zone.kind {
            ZoneKind::Single => self.set_brightness(zone.id, shade.intensity),
            ZoneKind::Pixels => {
                self.set_color_and_brightness(zone.id, shade.color, shade.intensity);
            }
        }
    }

    /// Stage a previously committed value verbatim, without ceiling scaling
    pub fn restore(&mut self, zone: ZoneId, value: ZoneValue) {
        if let Some(slot) = self.slot_mut(zone) {
            slot.stage(value);
        }
    }

    /// Last flushed brightness, 0 for unknown zones
    pub fn brightness(&self, zone: ZoneId) -> u8 {
        self.slot(zone).map_or(0, |slot| slot.committed.brightness)
    }

    /// Last flushed color, black for unknown zones
    pub fn color(&self, zone: ZoneId) -> Rgb {
        self.slot(zone).map_or(BLACK, |slot| slot.committed.color)
    }

    /// Last flushed value
    pub fn value(&self, zone: ZoneId) -> Option<ZoneValue> {
        self.slot(zone).map(|slot| slot.committed)
    }

    pub fn is_dirty(&self, zone: ZoneId) -> bool {
        self.slot(zone).is_some_and(|slot| slot.dirty)
    }

    /// Commit every dirty zone to the driver
    ///
    /// Returns the number of zones written.
    pub fn flush<D: ZoneDriver>(&mut self, driver: &mut D) -> usize {
        let mut written = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.dirty) {
            slot.committed = slot.pending;
            slot.dirty = false;
            driver.write(slot.id, slot.kind, slot.committed);
            written += 1;
        }
        written
    }

    fn slot(&self, zone: ZoneId) -> Option<&ZoneSlot> {
        self.slots.iter().find(|slot| slot.id == zone)
    }

    fn slot_mut(&mut self, zone: ZoneId) -> Option<&mut ZoneSlot> {
        self.slots.iter_mut().find(|slot| slot.id == zone)
    }
}
