#![allow(dead_code)]

use myrtio_vfx_engine::{
    AudioPlayer, EffectEngine, EngineConfig, Instant, SceneConfig, SceneTable, Zone, ZoneDriver,
    ZoneId, ZoneKind, ZoneTable, ZoneValue,
};

/// Driver that keeps every write
#[derive(Debug, Default)]
pub struct Recorder {
    pub writes: Vec<(ZoneId, ZoneKind, ZoneValue)>,
}

impl Recorder {
    pub fn writes_for(&self, zone: ZoneId) -> Vec<ZoneValue> {
        self.writes
            .iter()
            .filter(|(id, _, _)| *id == zone)
            .map(|(_, _, value)| *value)
            .collect()
    }
}

impl ZoneDriver for Recorder {
    fn write(&mut self, zone: ZoneId, kind: ZoneKind, value: ZoneValue) {
        self.writes.push((zone, kind, value));
    }
}

/// Audio player that keeps every call
#[derive(Debug)]
pub struct RecordingAudio {
    pub available: bool,
    pub played: Vec<(u16, bool)>,
    pub stops: usize,
}

impl RecordingAudio {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            played: Vec::new(),
            stops: 0,
        }
    }
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, file: u16, looped: bool) -> bool {
        self.played.push((file, looped));
        true
    }

    fn stop(&mut self) -> bool {
        self.stops += 1;
        true
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

pub type TestEngine = EffectEngine<ZoneTable, SceneTable, Recorder>;

pub fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

pub fn zones(list: &[Zone]) -> ZoneTable {
    let mut table = ZoneTable::new();
    for zone in list {
        table.add(zone.clone()).unwrap();
    }
    table
}

pub fn scenes(list: &[SceneConfig]) -> SceneTable {
    let mut table = SceneTable::new();
    for scene in list {
        table.add(scene.clone()).unwrap();
    }
    table
}

pub fn quiet_config() -> EngineConfig {
    EngineConfig {
        seed: 7,
        default_ambient: false,
    }
}

pub fn engine(zone_list: &[Zone], scene_list: &[SceneConfig], config: &EngineConfig) -> TestEngine {
    EffectEngine::new(
        zones(zone_list),
        scenes(scene_list),
        Recorder::default(),
        config,
    )
}
