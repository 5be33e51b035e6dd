//! Application settings and the settings window.

use eframe::egui;
use egui_ltreeview::TreeView;

/// Settings categories
#[derive(Debug, Clone, Copy, PartialEq)]
enum SettingsCategory {
    General,
    UI,
}

impl SettingsCategory {
    fn as_str(&self) -> &'static str {
        match self {
            SettingsCategory::General => "General",
            SettingsCategory::UI => "UI",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "General" => Some(SettingsCategory::General),
            "UI" => Some(SettingsCategory::UI),
            _ => None,
        }
    }
}

/// Font size the UI was designed around; other sizes scale the whole UI.
const BASE_FONT_SIZE: f32 = 14.0;

/// Application settings, persisted with the rest of the app state.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppSettings {
    // Editing
    pub confirm_on_delete: bool,
    /// Remember the type picked in the type tree as the default bitfield base
    pub remember_base_type: bool,

    // UI
    pub dark_mode: bool,
    pub font_size: f32,
    pub show_type_tree: bool,
    pub show_tooltips: bool,

    /// Selected category in the settings window (persistent)
    pub selected_settings_category: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            confirm_on_delete: false,
            remember_base_type: true,
            dark_mode: true,
            font_size: BASE_FONT_SIZE,
            show_type_tree: true,
            show_tooltips: true,
            selected_settings_category: None,
        }
    }
}

impl AppSettings {
    /// UI zoom derived from the font size slider; 1.0 at the default size.
    pub fn zoom_factor(&self) -> f32 {
        self.font_size / BASE_FONT_SIZE
    }
}

fn render_general_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Editing");
    ui.add_space(8.0);
    ui.checkbox(&mut settings.confirm_on_delete, "Confirm before deleting components");
    ui.checkbox(
        &mut settings.remember_base_type,
        "Use the type selected in the type tree as the bitfield base",
    );
}

fn render_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Appearance");
    ui.add_space(8.0);
    ui.checkbox(&mut settings.dark_mode, "Dark mode");
    ui.horizontal(|ui| {
        ui.label("Font size:");
        ui.add(egui::Slider::new(&mut settings.font_size, 10.0..=22.0));
    });

    ui.add_space(16.0);
    ui.heading("Panels");
    ui.add_space(8.0);
    ui.checkbox(&mut settings.show_type_tree, "Show type tree panel");
    ui.checkbox(&mut settings.show_tooltips, "Show tooltips");
}

/// Render settings window
pub fn render_settings_window(
    ctx: &egui::Context,
    show_settings: &mut bool,
    settings: &mut AppSettings,
) {
    let mut selected = settings
        .selected_settings_category
        .as_ref()
        .and_then(|s| SettingsCategory::from_str(s))
        .unwrap_or(SettingsCategory::General);

    egui::Window::new("Settings")
        .id(egui::Id::new("settings_window"))
        .open(show_settings)
        .default_size([520.0, 360.0])
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Left panel: category tree
                ui.vertical(|ui| {
                    ui.set_width(140.0);
                    ui.add_space(4.0);

                    let tree_id = ui.make_persistent_id("settings_tree_view");
                    let (_response, actions) = TreeView::new(tree_id).show(ui, |builder| {
                        builder.leaf(0, SettingsCategory::General.as_str());
                        builder.leaf(1, SettingsCategory::UI.as_str());
                    });

                    for action in actions {
                        if let egui_ltreeview::Action::SetSelected(node_ids) = action
                            && let Some(&node_id) = node_ids.first()
                        {
                            selected = match node_id {
                                0 => SettingsCategory::General,
                                1 => SettingsCategory::UI,
                                _ => selected,
                            };
                        }
                    }
                });

                ui.separator();

                ui.vertical(|ui| {
                    ui.add_space(8.0);
                    match selected {
                        SettingsCategory::General => render_general_settings(ui, settings),
                        SettingsCategory::UI => render_ui_settings(ui, settings),
                    }
                });
            });
        });

    settings.selected_settings_category = Some(selected.as_str().to_string());
}
