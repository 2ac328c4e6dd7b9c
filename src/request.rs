//! Effect requests from other tasks or interrupts.
//!
//! A bounded queue built on `critical-section` and `heapless::Deque`, so a
//! web handler, a serial console or a button ISR can post requests while
//! the render loop drains them between frames.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;
use heapless::Deque;

use crate::zone::{Name, ZoneId, name};

/// Control request for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectRequest {
    /// Trigger a scene or effect; zero duration uses the scene's own
    Trigger { name: Name, duration: Duration },
    Enable(Name),
    Disable(Name),
    EnableAmbient,
    DisableAmbient,
    StopActive,
    StopGlobal,
    /// Stop every effect and the audio
    StopAll,
    SetZoneBrightness { zone: ZoneId, brightness: u8 },
}

impl EffectRequest {
    pub fn trigger(scene: &str) -> Self {
        Self::Trigger {
            name: name(scene),
            duration: Duration::from_millis(0),
        }
    }

    pub fn trigger_for(scene: &str, duration: Duration) -> Self {
        Self::Trigger {
            name: name(scene),
            duration,
        }
    }
}

/// Error returned when the queue is full; carries the rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueFull(pub EffectRequest);

/// A bounded, interrupt-safe request queue.
pub struct RequestQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<EffectRequest, SIZE>>>,
}

impl<const SIZE: usize> RequestQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this queue.
    ///
    /// Multiple senders can coexist; they share access to the same queue.
    pub const fn sender(&self) -> RequestSender<'_, SIZE> {
        RequestSender { queue: self }
    }

    pub const fn receiver(&self) -> RequestReceiver<'_, SIZE> {
        RequestReceiver { queue: self }
    }

    /// Returns `Err(QueueFull(request))` if the queue is full.
    pub fn try_send(&self, request: EffectRequest) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(request).map_err(QueueFull)
        })
    }

    /// Next request in arrival order, if any
    pub fn try_receive(&self) -> Option<EffectRequest> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for RequestQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting end of a [`RequestQueue`]
#[derive(Clone, Copy)]
pub struct RequestSender<'a, const SIZE: usize> {
    queue: &'a RequestQueue<SIZE>,
}

impl<const SIZE: usize> RequestSender<'_, SIZE> {
    pub fn try_send(&self, request: EffectRequest) -> Result<(), QueueFull> {
        self.queue.try_send(request)
    }
}

/// Draining end of a [`RequestQueue`]
#[derive(Clone, Copy)]
pub struct RequestReceiver<'a, const SIZE: usize> {
    queue: &'a RequestQueue<SIZE>,
}

impl<const SIZE: usize> RequestReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<EffectRequest> {
        self.queue.try_receive()
    }
}
