//! Editor layer: models, provider and editor events.

pub mod editor_events;
pub mod model;
pub mod provider;

pub use model::{CompEditorModel, EditorModel, ModelNotification, Row};
pub use provider::EditorProvider;
