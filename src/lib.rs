#![no_std]

pub mod arbiter;
pub mod color;
pub mod director;
pub mod effect;
pub mod engine;
pub mod frame_scheduler;
mod log;
pub mod math8;
pub mod output;
pub mod request;
pub mod scene;
pub mod timer;
pub mod zone;

pub use arbiter::{ArbiterEdge, PriorityArbiter, Tier};
pub use director::{AudioPlayer, NoAudio, SceneDirector};
pub use effect::{EffectId, EffectSlot};
pub use engine::{EffectEngine, EffectStatus, EngineConfig, EngineError, EngineStatus};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use output::{OutputSink, Shade, ZoneDriver, ZoneValue};
pub use request::{EffectRequest, QueueFull, RequestQueue, RequestReceiver, RequestSender};
pub use scene::{SceneConfig, SceneStore, SceneTable};
pub use timer::{Timestamp, TriggerTimer};
pub use zone::{Zone, ZoneError, ZoneId, ZoneKind, ZoneModel, ZoneTable};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};
