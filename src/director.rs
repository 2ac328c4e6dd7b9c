//! Scene director: turns queued requests into engine calls and audio cues.
//!
//! The engine never touches audio. The director sits next to it, drains the
//! [`RequestQueue`](crate::request::RequestQueue) once per frame and fires the
//! scene's audio file after a successful trigger.

use embassy_time::{Duration, Instant};

use crate::effect::EffectId;
use crate::engine::{EffectEngine, EngineError};
use crate::log::log;
use crate::output::ZoneDriver;
use crate::request::{EffectRequest, RequestReceiver};
use crate::scene::{SceneConfig, SceneStore};
use crate::zone::ZoneModel;

/// Audio cue player
///
/// Implement this trait for the sound module on the board.
pub trait AudioPlayer {
    /// Start playing a numbered file; returns `false` if the player refused
    fn play(&mut self, file: u16, looped: bool) -> bool;

    fn stop(&mut self) -> bool;

    /// True once the player is initialised and responding
    fn is_available(&self) -> bool;
}

/// Player for builds without a sound module
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudio;

impl AudioPlayer for NoAudio {
    fn play(&mut self, _file: u16, _looped: bool) -> bool {
        false
    }

    fn stop(&mut self) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        false
    }
}

pub struct SceneDirector<'a, A: AudioPlayer, const SIZE: usize> {
    requests: RequestReceiver<'a, SIZE>,
    audio: A,
}

impl<'a, A: AudioPlayer, const SIZE: usize> SceneDirector<'a, A, SIZE> {
    pub const fn new(requests: RequestReceiver<'a, SIZE>, audio: A) -> Self {
        Self { requests, audio }
    }

    pub const fn audio(&self) -> &A {
        &self.audio
    }

    pub const fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Apply every queued request (non-blocking)
    ///
    /// Returns the number of requests processed.
    pub fn process_pending<Z: ZoneModel, S: SceneStore, D: ZoneDriver>(
        &mut self,
        engine: &mut EffectEngine<Z, S, D>,
        now: Instant,
    ) -> usize {
        let mut processed = 0;
        while let Some(request) = self.requests.try_receive() {
            self.apply(engine, request, now);
            processed += 1;
        }
        processed
    }

    /// Trigger a scene and start its audio cue
    pub fn play_scene<Z: ZoneModel, S: SceneStore, D: ZoneDriver>(
        &mut self,
        engine: &mut EffectEngine<Z, S, D>,
        name: &str,
        duration: Duration,
        now: Instant,
    ) -> Result<EffectId, EngineError> {
        let effect = engine.trigger_effect(name, duration, now)?;
        if let Some(scene) = engine.scenes().scene(name) {
            self.cue(scene);
        }
        Ok(effect)
    }

    fn apply<Z: ZoneModel, S: SceneStore, D: ZoneDriver>(
        &mut self,
        engine: &mut EffectEngine<Z, S, D>,
        request: EffectRequest,
        now: Instant,
    ) {
        let result = match request {
            EffectRequest::Trigger { name, duration } => self
                .play_scene(engine, &name, duration, now)
                .map(|_| ()),
            EffectRequest::Enable(name) => engine.enable_effect(&name).map(|_| ()),
            EffectRequest::Disable(name) => engine.disable_effect(&name).map(|_| ()),
            EffectRequest::EnableAmbient => {
                engine.enable_ambient();
                if let Some(scene) = engine
                    .scenes()
                    .scenes()
                    .iter()
                    .find(|scene| scene.is_ambient() && scene.has_audio())
                {
                    self.cue(scene);
                }
                Ok(())
            }
            EffectRequest::DisableAmbient => {
                engine.disable_ambient();
                Ok(())
            }
            EffectRequest::StopActive => {
                engine.stop_active();
                Ok(())
            }
            EffectRequest::StopGlobal => {
                engine.stop_global();
                Ok(())
            }
            EffectRequest::StopAll => {
                engine.stop_all();
                if self.audio.is_available() {
                    self.audio.stop();
                }
                Ok(())
            }
            EffectRequest::SetZoneBrightness { zone, brightness } => {
                if !engine.set_zone_brightness(zone, brightness) {
                    log!("[SceneDirector] unknown zone {}", zone);
                }
                Ok(())
            }
        };

        if let Err(err) = result {
            log!("[SceneDirector] request failed: {}", err);
        }
    }

    fn cue(&mut self, scene: &SceneConfig) {
        let Some(file) = scene.audio_file else {
            return;
        };
        if !self.audio.is_available() {
            log!("[SceneDirector] audio unavailable, {} plays silent", scene.name);
            return;
        }
        if !self.audio.play(file, scene.is_ambient()) {
            log!("[SceneDirector] audio file {} failed to start", file);
        }
    }
}
