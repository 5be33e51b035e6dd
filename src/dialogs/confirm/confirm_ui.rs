//! Confirmation dialog UI.

use eframe::egui;

use crate::widgets::actions::ActionQueue;

use super::confirm::ConfirmDialog;
use super::confirm_events::{ConfirmAcceptedEvent, ConfirmDismissedEvent};

impl ConfirmDialog {
    pub fn ui(&mut self, ctx: &egui::Context) -> ActionQueue {
        let mut queue = ActionQueue::new();
        let mut open = true;

        egui::Window::new("Confirm")
            .id(egui::Id::new("confirm_dialog"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        queue.send(ConfirmAcceptedEvent(self.action));
                    }
                    if ui.button("Cancel").clicked() {
                        queue.send(ConfirmDismissedEvent);
                    }
                });
            });

        if !open {
            queue.send(ConfirmDismissedEvent);
        }
        queue
    }
}
