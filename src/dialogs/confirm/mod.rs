//! Confirmation dialog for destructive operations.

pub mod confirm;
pub mod confirm_events;
mod confirm_ui;

pub use confirm::ConfirmDialog;
