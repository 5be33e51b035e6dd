//! Shared action queue for widgets that emit events.

use crate::core::event_bus::{BoxedEvent, Event};

/// Widget actions result - all actions via events.
#[derive(Default)]
pub struct ActionQueue {
    pub events: Vec<BoxedEvent>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched.
    pub fn send<E: Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }

    /// Fold another widget's queue into this one.
    pub fn merge(&mut self, other: ActionQueue) {
        self.events.extend(other.events);
    }

    /// Forward all queued events to the bus.
    pub fn dispatch(self, bus: &crate::core::event_bus::EventBus) {
        for event in self.events {
            bus.emit_boxed(event);
        }
    }
}
