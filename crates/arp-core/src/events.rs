//! Scene notifications

use crate::object::ObjectHandle;
use crate::pose::Pose;

/// Something observable that happened to the scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Placed {
        handle: ObjectHandle,
        variant: String,
        pose: Pose,
    },
    ObjectGrabbed(ObjectHandle),
    ObjectDropped(ObjectHandle),
    ObjectRemoved(ObjectHandle),
    SceneReset {
        removed: usize,
    },
}

/// Receives scene events after each mutation and at the end of each tick
pub trait SceneObserver: Send {
    fn on_event(&mut self, event: &SceneEvent, now: f64);
}

/// Pending events, delivered in the order they were queued
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<SceneEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&mut self, event: SceneEvent) {
        self.pending.push(event);
    }

    /// Take all pending events
    pub fn take(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
