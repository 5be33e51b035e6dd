//! Editor events: selection, model mutations and menu invocations.
//!
//! Widgets emit these through their action queues; the app drains them from
//! the bus once per frame and applies the side effects. Enablement of all
//! registered actions is recomputed whenever selection, model identity or
//! composite presence changes, which is exactly the set of events below.

use std::path::PathBuf;

use crate::entities::{CompositeKind, DataType};

/// Table selection changed (rows are table row indices, not ordinals).
#[derive(Clone, Debug)]
pub struct SelectionChangedEvent {
    pub rows: Vec<usize>,
    pub anchor: Option<usize>,
}

/// The composite's contents changed (components added/removed/edited).
#[derive(Clone, Debug)]
pub struct CompositeModifiedEvent;

/// A different composite was loaded into the editor (or none).
#[derive(Clone, Debug)]
pub struct CompositeLoadedEvent;

/// A popup/menu entry for the named action was clicked.
#[derive(Clone, Debug)]
pub struct ActionInvokedEvent(pub &'static str);

// === Application / file events ===

#[derive(Clone, Debug)]
pub struct NewCompositeEvent {
    pub kind: CompositeKind,
}

#[derive(Clone, Debug)]
pub struct OpenCompositeEvent(pub PathBuf);

#[derive(Clone, Debug)]
pub struct SaveCompositeEvent(pub PathBuf);

/// Toggle between aligned and unaligned packing for the composite under edit.
#[derive(Clone, Debug)]
pub struct TogglePackingEvent;

/// A type was picked in the type tree; remembered as the preferred base type
/// for the next bitfield dialog.
#[derive(Clone, Debug)]
pub struct SetPreferredBaseTypeEvent(pub DataType);
