//! Composite file I/O for CompEditApp.
//!
//! Composites are saved as JSON. File dialogs run synchronously via rfd.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use super::CompEditApp;
use crate::editor::editor_events::{OpenCompositeEvent, SaveCompositeEvent};
use crate::entities::Composite;

/// Write a composite to `path` as pretty-printed JSON.
pub fn save_composite(path: &Path, composite: &Composite) -> Result<()> {
    let json = serde_json::to_string_pretty(composite)
        .context("Failed to serialize composite")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read a composite back from a JSON file.
pub fn load_composite(path: &Path) -> Result<Composite> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let composite: Composite = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(composite)
}

impl CompEditApp {
    /// Load a composite from disk into the editor.
    pub fn open_composite(&mut self, path: PathBuf) {
        match load_composite(&path) {
            Ok(composite) => {
                info!(
                    "Loaded composite '{}' ({} components) from {}",
                    composite.name,
                    composite.num_components(),
                    path.display()
                );
                if let Some(model) = self.provider.model.as_composite_mut() {
                    model.load_composite(Some(composite));
                }
                self.composite_path = Some(path);
                self.error_msg = None;
                self.provider.recompute_enablement();
            }
            Err(e) => {
                let msg = format!("Open failed: {e:#}");
                warn!("{msg}");
                self.error_msg = Some(msg);
            }
        }
    }

    /// Save the composite to an explicit path (Save As).
    pub fn save_composite_to(&mut self, path: PathBuf) {
        let Some(composite) = self
            .provider
            .model
            .as_composite()
            .and_then(|m| m.view_composite.as_ref())
        else {
            self.error_msg = Some("Nothing to save".to_string());
            return;
        };
        match save_composite(&path, composite) {
            Ok(()) => {
                info!("Saved composite to {}", path.display());
                self.composite_path = Some(path);
                self.error_msg = None;
            }
            Err(e) => {
                let msg = format!("Save failed: {e:#}");
                warn!("{msg}");
                self.error_msg = Some(msg);
            }
        }
    }

    /// Save to the known path, falling back to Save As.
    pub fn quick_save(&mut self) {
        match self.composite_path.clone() {
            Some(path) => self.event_bus.emit(SaveCompositeEvent(path)),
            None => self.show_save_dialog(),
        }
    }

    pub fn show_open_dialog(&mut self) {
        if let Some(path) = composite_file_dialog("Open Composite").pick_file() {
            self.event_bus.emit(OpenCompositeEvent(path));
        }
    }

    pub fn show_save_dialog(&mut self) {
        if let Some(path) = composite_file_dialog("Save Composite").save_file() {
            self.event_bus.emit(SaveCompositeEvent(path));
        }
    }
}

/// Create configured file dialog for composite JSON files.
fn composite_file_dialog(title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("Composite JSON", &["json"])
        .set_title(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Component, CompositeKind, DataType, Packing};

    #[test]
    fn test_save_and_load_round_trip() {
        let mut composite = Composite::new("packet", CompositeKind::Structure, Packing::Aligned);
        composite.push(Component::plain(DataType::UInt16, 0).with_name("id"));
        composite.push(Component::bitfield(DataType::UInt8, 3, 0, 0).with_name("flags"));
        composite.flex_array = Some(DataType::Char);

        let dir = std::env::temp_dir().join("compedit_io_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("packet.json");

        save_composite(&path, &composite).unwrap();
        let loaded = load_composite(&path).unwrap();
        assert_eq!(loaded, composite);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = load_composite(Path::new("/nonexistent/compedit.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
