//! Core infrastructure (event bus).

pub mod event_bus;

pub use event_bus::{BoxedEvent, EventBus, EventEmitter, ModelEventEmitter, downcast_event};
