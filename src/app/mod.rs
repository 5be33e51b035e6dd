//! Application module - CompEditApp and related functionality.
//!
//! Submodules:
//! - `events` - event bus handling (handle_events)
//! - `project_io` - composite file loading and saving

mod events;
mod project_io;

use std::sync::Arc;

use eframe::egui;
use log::info;

use crate::config;
use crate::core::event_bus::{EventBus, ModelEventEmitter};
use crate::dialogs::prefs::{AppSettings, render_settings_window};
use crate::editor::editor_events::{NewCompositeEvent, TogglePackingEvent};
use crate::editor::model::{CompEditorModel, EditorModel, ModelNotification};
use crate::editor::provider::EditorProvider;
use crate::entities::{Composite, CompositeKind, DataTypeManager, Packing};
use crate::widgets::type_tree::TypeTree;

/// Main application state.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CompEditApp {
    pub settings: AppSettings,
    /// Composite under edit, synced from the provider on save (persistent).
    pub composite: Option<Composite>,
    /// File the composite was loaded from / last saved to (persistent).
    pub composite_path: Option<std::path::PathBuf>,

    #[serde(skip)]
    pub provider: EditorProvider,
    #[serde(skip)]
    pub event_bus: EventBus,
    #[serde(skip)]
    pub show_settings: bool,
    #[serde(skip)]
    pub error_msg: Option<String>,
    #[serde(skip)]
    pub path_config: config::PathConfig,
    #[serde(skip)]
    restored: bool,
}

impl Default for CompEditApp {
    fn default() -> Self {
        let dtm = Arc::new(DataTypeManager::builtin());
        Self {
            settings: AppSettings::default(),
            composite: None,
            composite_path: None,
            provider: EditorProvider::new(
                EditorModel::Composite(CompEditorModel::new(None)),
                dtm,
            ),
            event_bus: EventBus::new(),
            show_settings: false,
            error_msg: None,
            path_config: config::PathConfig::from_env_and_cli(None),
            restored: false,
        }
    }
}

impl CompEditApp {
    /// Push the persisted composite into the freshly built provider and wire
    /// the model to the event bus. Runs once, on the first frame.
    fn restore_session(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let emitter = ModelEventEmitter::from_emitter(self.event_bus.emitter());
        if let Some(model) = self.provider.model.as_composite_mut() {
            model.set_event_emitter(emitter);
            if let Some(composite) = self.composite.clone() {
                info!("Restoring composite '{}' from previous session", composite.name);
                model.load_composite(Some(composite));
            }
            // Session restore is not an edit; drop the load notifications
            model.take_notifications();
        }
        self.provider.recompute_enablement();
    }

    /// Start editing a brand new composite.
    pub fn new_composite(&mut self, kind: CompositeKind) {
        let name = match kind {
            CompositeKind::Structure => "NewStructure",
            CompositeKind::Union => "NewUnion",
        };
        let composite = Composite::new(name, kind, Packing::Aligned);
        if let Some(model) = self.provider.model.as_composite_mut() {
            model.load_composite(Some(composite));
        }
        self.composite_path = None;
        self.provider.recompute_enablement();
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Structure").clicked() {
                    self.event_bus.emit(NewCompositeEvent {
                        kind: CompositeKind::Structure,
                    });
                }
                if ui.button("New Union").clicked() {
                    self.event_bus.emit(NewCompositeEvent {
                        kind: CompositeKind::Union,
                    });
                }
                ui.separator();
                if ui.button("Open...").clicked() {
                    self.show_open_dialog();
                }
                if ui.button("Save").clicked() {
                    self.quick_save();
                }
                if ui.button("Save As...").clicked() {
                    self.show_save_dialog();
                }
                ui.separator();
                if ui.button("Settings...").clicked() {
                    self.show_settings = true;
                }
            });
            ui.menu_button("Edit", |ui| {
                let label = if self.provider.model.as_composite().is_some_and(|m| m.is_aligned())
                {
                    "Disable packing"
                } else {
                    "Enable packing"
                };
                let has_composite = self
                    .provider
                    .model
                    .as_composite()
                    .is_some_and(|m| m.view_composite.is_some());
                if ui.add_enabled(has_composite, egui::Button::new(label)).clicked() {
                    self.event_bus.emit(TogglePackingEvent);
                }
            });
        });
    }

    /// Toggle the composite between aligned and unaligned packing.
    pub fn toggle_packing(&mut self) {
        if let Some(model) = self.provider.model.as_composite_mut() {
            if let Some(composite) = model.view_composite.as_mut() {
                let next = if composite.is_aligned() {
                    Packing::Unaligned
                } else {
                    Packing::Aligned
                };
                composite.set_packing(next);
                model.fire_table_data_changed();
                model.composite_info_changed();
            }
        }
        self.provider.recompute_enablement();
    }

    /// Header line above the table: name, kind, packing and total length.
    fn composite_summary(&self) -> Option<String> {
        let composite = self
            .provider
            .model
            .as_composite()?
            .view_composite
            .as_ref()?;
        let packing = match composite.packing {
            Packing::Aligned => "packed",
            Packing::Unaligned => "unpacked",
        };
        Some(format!(
            "{} ({}, {}) - {} bytes, {} components",
            composite.name,
            composite.kind.as_str(),
            packing,
            composite.len(),
            composite.num_components(),
        ))
    }
}

impl eframe::App for CompEditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.restore_session();

        ctx.set_visuals(if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        ctx.set_zoom_factor(self.settings.zoom_factor());

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui);
        });

        if self.settings.show_type_tree {
            egui::SidePanel::left("type_tree_panel")
                .default_width(180.0)
                .show(ctx, |ui| {
                    ui.heading("Types");
                    ui.separator();
                    let queue = TypeTree::ui(ui, &self.provider.dtm);
                    queue.dispatch(&self.event_bus);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.composite_summary() {
                Some(summary) => {
                    ui.label(summary);
                }
                None => {
                    ui.label("No composite loaded. File > New Structure to start.");
                }
            }
            if let Some(err) = &self.error_msg {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            ui.separator();
            let queue = self.provider.table_ui(ui, self.settings.show_tooltips);
            queue.dispatch(&self.event_bus);
        });

        let queue = self.provider.dialogs_ui(ctx);
        queue.dispatch(&self.event_bus);

        let mut show_settings = self.show_settings;
        render_settings_window(ctx, &mut show_settings, &mut self.settings);
        self.show_settings = show_settings;

        self.handle_events(ctx);

        // Drain model refresh notifications queued by this frame's edits
        if let Some(model) = self.provider.model.as_composite_mut() {
            for notification in model.take_notifications() {
                match notification {
                    ModelNotification::DataChanged | ModelNotification::InfoChanged => {
                        ctx.request_repaint();
                    }
                }
            }
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Sync the persisted copy from the live model
        if let Some(model) = self.provider.model.as_composite() {
            self.composite = model.view_composite.clone();
        }
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
        }
    }
}
