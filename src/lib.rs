//! COMPEDIT - Composite data type editor library
//!
//! Re-exports all modules for use by binary targets.

// Core infrastructure (event bus)
pub mod core;

// App modules
pub mod actions;
pub mod app;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod editor;
pub mod entities;
pub mod widgets;

// Re-export commonly used types from core
pub use core::event_bus::{BoxedEvent, EventBus, EventEmitter, ModelEventEmitter, downcast_event};

// Re-export entities
pub use entities::{BitFieldSpec, Component, Composite, CompositeKind, DataType, Packing};
