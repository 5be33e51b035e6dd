//! Bitfield editor dialog UI.

use eframe::egui;

use crate::entities::DataTypeManager;
use crate::widgets::actions::ActionQueue;

use super::bitfield::BitFieldEditorDialog;
use super::bitfield_events::{BitFieldCancelEvent, BitFieldInsertEvent};

impl BitFieldEditorDialog {
    /// Render the modal window. Insert/Cancel are reported through the
    /// returned action queue; the app owns the actual model mutation.
    pub fn ui(&mut self, ctx: &egui::Context, dtm: &DataTypeManager) -> ActionQueue {
        let mut queue = ActionQueue::new();
        let mut open = true;

        egui::Window::new("Add Bitfield")
            .id(egui::Id::new("bitfield_editor_dialog"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("bitfield_fields")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Base type:");
                        egui::ComboBox::from_id_salt("bitfield_base")
                            .selected_text(self.draft.base.name())
                            .show_ui(ui, |ui| {
                                for dt in dtm.bitfield_bases() {
                                    ui.selectable_value(&mut self.draft.base, dt, dt.name());
                                }
                            });
                        ui.end_row();

                        ui.label("Bit size:");
                        ui.add(
                            egui::DragValue::new(&mut self.draft.bit_size)
                                .range(1..=self.draft.base.bit_capacity()),
                        );
                        ui.end_row();

                        ui.label("Bit offset:");
                        ui.add(
                            egui::DragValue::new(&mut self.draft.bit_offset)
                                .range(0..=self.draft.base.bit_capacity() - 1),
                        );
                        ui.end_row();

                        ui.label("Byte offset:");
                        ui.add(egui::DragValue::new(&mut self.draft.byte_offset));
                        ui.end_row();

                        ui.label("Field name:");
                        ui.text_edit_singleline(&mut self.draft.field_name);
                        ui.end_row();
                    });

                // Live validation; apply() re-checks before mutating
                let valid = self.draft.validate().is_ok();
                if let Err(msg) = self.draft.validate() {
                    ui.colored_label(egui::Color32::LIGHT_RED, msg);
                } else if let Some(msg) = &self.error {
                    ui.colored_label(egui::Color32::LIGHT_RED, msg);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(valid, egui::Button::new("Insert"))
                        .clicked()
                    {
                        queue.send(BitFieldInsertEvent);
                    }
                    if ui.button("Cancel").clicked() {
                        queue.send(BitFieldCancelEvent);
                    }
                });
            });

        if !open {
            queue.send(BitFieldCancelEvent);
        }
        queue
    }
}
