pub mod bitfield;
pub mod bitfield_events;
pub mod bitfield_ui;

pub use bitfield::{BitFieldDraft, BitFieldEditorDialog, Placement};
