/// Input queued by event sources between ticks.
///
/// Event handlers never touch the scene or the registry directly: they push
/// through a `SchedulerHandle` and the next tick consumes what was queued.

use std::sync::{Arc, Mutex};
use glam::Vec2;

/// Input visible to motion controllers during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Latest pointer offset from the surface centre, in pixels.
    /// `None` until the first sample arrives; never reset afterwards.
    pub pointer: Option<Vec2>,
}

#[derive(Debug, Default)]
pub(crate) struct PendingInput {
    pub pointer: Option<Vec2>,
    pub resize: Option<(u32, u32)>,
    pub stop: bool,
}

/// Cloneable, thread-safe queue into a `FrameScheduler`
#[derive(Clone, Default)]
pub struct SchedulerHandle {
    pending: Arc<Mutex<PendingInput>>,
}

impl SchedulerHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a pointer sample. Only the latest sample per tick is kept.
    pub fn push_pointer(&self, x: f32, y: f32) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.pointer = Some(Vec2::new(x, y));
        }
    }

    /// Request a surface resize. Only the latest request per tick is kept.
    pub fn push_resize(&self, width: u32, height: u32) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.resize = Some((width, height));
        }
    }

    /// Ask the scheduler to stop at its next tick
    pub fn request_stop(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.stop = true;
        }
    }

    /// A stop request is waiting to be consumed
    pub(crate) fn stop_requested(&self) -> bool {
        match self.pending.lock() {
            Ok(pending) => pending.stop,
            Err(_) => false,
        }
    }

    pub(crate) fn take(&self) -> PendingInput {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => PendingInput::default(),
        }
    }
}
