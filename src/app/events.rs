//! Event handling for CompEditApp.

use eframe::egui;
use log::{info, trace};

use super::CompEditApp;
use crate::actions::delete_component::DELETE_ACTION_NAME;
use crate::core::event_bus::downcast_event;
use crate::dialogs::ConfirmDialog;
use crate::dialogs::bitfield::bitfield_events::{BitFieldCancelEvent, BitFieldInsertEvent};
use crate::dialogs::confirm::confirm_events::{ConfirmAcceptedEvent, ConfirmDismissedEvent};
use crate::editor::editor_events::{
    ActionInvokedEvent, CompositeLoadedEvent, CompositeModifiedEvent, NewCompositeEvent,
    OpenCompositeEvent, SaveCompositeEvent, SelectionChangedEvent, SetPreferredBaseTypeEvent,
    TogglePackingEvent,
};

impl CompEditApp {
    /// Handle events from the event bus.
    pub fn handle_events(&mut self, ctx: &egui::Context) {
        // Deferred actions to execute after the event loop
        let mut deferred_actions: Vec<&'static str> = Vec::new();
        let mut deferred_open: Option<std::path::PathBuf> = None;
        let mut deferred_save: Option<std::path::PathBuf> = None;

        for event in self.event_bus.poll() {
            if let Some(e) = downcast_event::<SelectionChangedEvent>(&event) {
                trace!("selection changed: {:?}", e.rows);
                self.provider.apply_selection(e.rows.clone(), e.anchor);
                continue;
            }
            if let Some(e) = downcast_event::<ActionInvokedEvent>(&event) {
                info!("action invoked: {}", e.0);
                if e.0 == DELETE_ACTION_NAME && self.settings.confirm_on_delete {
                    self.provider.dialogs.open_confirm(ConfirmDialog::for_action(
                        DELETE_ACTION_NAME,
                        "Delete the selected components?",
                    ));
                } else {
                    deferred_actions.push(e.0);
                }
                continue;
            }
            if let Some(e) = downcast_event::<ConfirmAcceptedEvent>(&event) {
                self.provider.dialogs.close_confirm();
                deferred_actions.push(e.0);
                continue;
            }
            if downcast_event::<ConfirmDismissedEvent>(&event).is_some() {
                self.provider.dialogs.close_confirm();
                continue;
            }
            if downcast_event::<BitFieldInsertEvent>(&event).is_some() {
                self.provider.apply_bitfield_dialog();
                continue;
            }
            if downcast_event::<BitFieldCancelEvent>(&event).is_some() {
                self.provider.dialogs.close_bitfield();
                continue;
            }
            if let Some(e) = downcast_event::<SetPreferredBaseTypeEvent>(&event) {
                if e.0.is_integer() && self.settings.remember_base_type {
                    trace!("preferred bitfield base: {}", e.0.name());
                    self.provider.preferred_base = Some(e.0);
                }
                continue;
            }
            if let Some(e) = downcast_event::<NewCompositeEvent>(&event) {
                self.new_composite(e.kind);
                continue;
            }
            if let Some(e) = downcast_event::<OpenCompositeEvent>(&event) {
                deferred_open = Some(e.0.clone());
                continue;
            }
            if let Some(e) = downcast_event::<SaveCompositeEvent>(&event) {
                deferred_save = Some(e.0.clone());
                continue;
            }
            if downcast_event::<TogglePackingEvent>(&event).is_some() {
                self.toggle_packing();
                continue;
            }
            if downcast_event::<CompositeModifiedEvent>(&event).is_some() {
                self.provider.recompute_enablement();
                ctx.request_repaint();
                continue;
            }
            if downcast_event::<CompositeLoadedEvent>(&event).is_some() {
                self.provider.recompute_enablement();
                ctx.request_repaint();
                continue;
            }
            trace!("unhandled event: {}", (*event).type_name());
        }

        let bus = self.event_bus.clone();
        for name in deferred_actions {
            self.provider.run_action(name, &bus);
        }
        if let Some(path) = deferred_open {
            self.open_composite(path);
        }
        if let Some(path) = deferred_save {
            self.save_composite_to(path);
        }
    }
}
