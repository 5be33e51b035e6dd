//! Editor provider: one open editor (model + table state + dialogs + actions).
//!
//! The provider owns the action registry and the per-editor UI state. The app
//! routes events to it; rendering borrows the pieces separately so widgets
//! never fight over the model.

use std::mem;
use std::sync::Arc;

use eframe::egui;
use log::warn;

use crate::actions::{
    ActionContext, ActionMeta, AddBitFieldAction, DeleteComponentAction, EditorAction,
};
use crate::core::event_bus::EventBus;
use crate::dialogs::DialogHost;
use crate::entities::{DataType, DataTypeManager};
use crate::widgets::actions::ActionQueue;
use crate::widgets::comp_table::{CompTable, TableState};

use super::model::EditorModel;

pub struct EditorProvider {
    pub model: EditorModel,
    pub table: TableState,
    pub dtm: Arc<DataTypeManager>,
    pub dialogs: DialogHost,
    /// Base type for the next bitfield insertion (from the type tree).
    pub preferred_base: Option<DataType>,
    actions: Vec<Box<dyn EditorAction>>,
}

impl Default for EditorProvider {
    /// Empty composite editor with the built-in type registry.
    fn default() -> Self {
        Self::new(
            EditorModel::Composite(crate::editor::model::CompEditorModel::new(None)),
            Arc::new(DataTypeManager::builtin()),
        )
    }
}

impl EditorProvider {
    /// Build a provider for `model`, registering the actions its editor kind
    /// supports. Only the composite editor carries the component actions.
    pub fn new(model: EditorModel, dtm: Arc<DataTypeManager>) -> Self {
        let actions: Vec<Box<dyn EditorAction>> = match &model {
            EditorModel::Composite(_) => vec![
                Box::new(AddBitFieldAction::new(&model)),
                Box::new(DeleteComponentAction::new(&model)),
            ],
            EditorModel::Enumeration(_) => Vec::new(),
        };
        let mut provider = Self {
            model,
            table: TableState::default(),
            dtm,
            dialogs: DialogHost::default(),
            preferred_base: None,
            actions,
        };
        provider.recompute_enablement();
        provider
    }

    /// Refresh every action's cached enablement against the model.
    pub fn recompute_enablement(&mut self) {
        for action in &mut self.actions {
            action.recompute_enablement(&self.model);
        }
    }

    /// (meta, enabled) pairs for the table's popup menu.
    pub fn action_states(&self) -> Vec<(ActionMeta, bool)> {
        self.actions
            .iter()
            .map(|a| (*a.meta(), a.is_enabled()))
            .collect()
    }

    /// Run the named action against this provider's state.
    pub fn run_action(&mut self, name: &str, bus: &EventBus) {
        // Actions borrow the provider mutably; take the registry out first.
        let mut actions = mem::take(&mut self.actions);
        let emitter = bus.emitter();
        match actions.iter_mut().find(|a| a.meta().name == name) {
            Some(action) => {
                let mut ctx = ActionContext {
                    model: &mut self.model,
                    table: &mut self.table,
                    dtm: &self.dtm,
                    dialogs: &mut self.dialogs,
                    events: &emitter,
                    preferred_base: self.preferred_base,
                };
                action.run(&mut ctx);
            }
            None => warn!("unknown editor action invoked: {name}"),
        }
        self.actions = actions;
        self.recompute_enablement();
    }

    /// Apply a selection coming from the table widget.
    pub fn apply_selection(&mut self, rows: Vec<usize>, anchor: Option<usize>) {
        if let Some(model) = self.model.as_composite_mut() {
            model.set_selection(rows);
        }
        self.table.anchor = anchor;
        self.recompute_enablement();
    }

    /// Commit the open bitfield dialog. On success the dialog closes, the
    /// table redraws and the selection lands on the new component; on a
    /// rejected draft the dialog stays up showing its error.
    pub fn apply_bitfield_dialog(&mut self) {
        let Some(mut dialog) = self.dialogs.bitfield.take() else {
            return;
        };
        let Some(model) = self.model.as_composite_mut() else {
            return;
        };
        match dialog.apply(model) {
            Some(ordinal) => {
                crate::actions::add_bitfield::refresh_table_and_selection(model, ordinal);
                self.table.scroll_to = Some(ordinal);
                self.table.request_focus();
                self.recompute_enablement();
            }
            None => self.dialogs.open_bitfield(dialog),
        }
    }

    /// Render the component table.
    pub fn table_ui(&mut self, ui: &mut egui::Ui, show_tooltips: bool) -> ActionQueue {
        match &self.model {
            EditorModel::Composite(model) => {
                let states = self.action_states();
                CompTable::ui(ui, model, &mut self.table, &states, show_tooltips)
            }
            EditorModel::Enumeration(_) => ActionQueue::new(),
        }
    }

    /// Render any open modal dialogs.
    pub fn dialogs_ui(&mut self, ctx: &egui::Context) -> ActionQueue {
        let mut queue = ActionQueue::new();
        if let Some(dialog) = self.dialogs.bitfield.as_mut() {
            queue.merge(dialog.ui(ctx, &self.dtm));
        }
        if let Some(dialog) = self.dialogs.confirm.as_mut() {
            queue.merge(dialog.ui(ctx));
        }
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::add_bitfield::ADD_BITFIELD_ACTION_NAME;
    use crate::dialogs::bitfield::{BitFieldEditorDialog, Placement};
    use crate::editor::model::{CompEditorModel, ModelNotification};
    use crate::entities::{Component, Composite, CompositeKind, Packing};

    fn provider(packing: Packing) -> EditorProvider {
        let mut composite = Composite::new("s", CompositeKind::Structure, packing);
        composite.push(Component::plain(DataType::Int32, 0));
        let model = EditorModel::Composite(CompEditorModel::new(Some(composite)));
        EditorProvider::new(model, Arc::new(DataTypeManager::builtin()))
    }

    #[test]
    fn test_composite_provider_registers_actions() {
        let p = provider(Packing::Aligned);
        let names: Vec<&str> = p.action_states().iter().map(|(m, _)| m.name).collect();
        assert!(names.contains(&"Add Bitfield"));
        assert!(names.contains(&"Delete Components"));
    }

    #[test]
    fn test_enum_provider_has_no_component_actions() {
        use crate::editor::model::EnumEditorModel;
        let p = EditorProvider::new(
            EditorModel::Enumeration(EnumEditorModel::default()),
            Arc::new(DataTypeManager::builtin()),
        );
        assert!(p.action_states().is_empty());
    }

    #[test]
    fn test_selection_drives_enablement() {
        let mut p = provider(Packing::Aligned);
        assert!(p.action_states().iter().all(|(_, enabled)| !enabled));

        p.apply_selection(vec![0], Some(0));
        let add_enabled = p
            .action_states()
            .iter()
            .find(|(m, _)| m.name == ADD_BITFIELD_ACTION_NAME)
            .map(|(_, e)| *e)
            .unwrap();
        assert!(add_enabled);
    }

    #[test]
    fn test_run_action_by_name() {
        let mut p = provider(Packing::Aligned);
        p.apply_selection(vec![0], Some(0));
        let bus = EventBus::new();
        p.run_action(ADD_BITFIELD_ACTION_NAME, &bus);

        let m = p.model.as_composite().unwrap();
        assert_eq!(m.view_composite.as_ref().unwrap().num_components(), 2);
        // Registry survives the call
        assert_eq!(p.action_states().len(), 2);
    }

    #[test]
    fn test_run_unknown_action_is_a_no_op() {
        let mut p = provider(Packing::Aligned);
        p.apply_selection(vec![0], Some(0));
        p.run_action("No Such Action", &EventBus::new());
        let m = p.model.as_composite().unwrap();
        assert_eq!(m.view_composite.as_ref().unwrap().num_components(), 1);
    }

    #[test]
    fn test_apply_bitfield_dialog_success_closes() {
        let mut p = provider(Packing::Unaligned);
        let model = p.model.as_composite().unwrap();
        let dialog = BitFieldEditorDialog::new(model, Placement::FromRow(0), DataType::UInt8);
        p.dialogs.open_bitfield(dialog);

        p.apply_bitfield_dialog();
        assert!(p.dialogs.bitfield.is_none());

        let m = p.model.as_composite_mut().unwrap();
        let c = m.view_composite.as_ref().unwrap();
        assert_eq!(c.num_components(), 2);
        // Placed after the existing component at the same offset
        assert!(c.component(1).unwrap().is_bitfield());
        assert_eq!(
            m.take_notifications(),
            vec![
                ModelNotification::DataChanged,
                ModelNotification::InfoChanged
            ]
        );
        assert_eq!(m.selected_rows(), &[1]);
    }

    #[test]
    fn test_apply_bitfield_dialog_failure_keeps_dialog() {
        let mut p = provider(Packing::Unaligned);
        let model = p.model.as_composite().unwrap();
        let mut dialog = BitFieldEditorDialog::new(model, Placement::FromRow(0), DataType::UInt8);
        dialog.draft.bit_offset = 7;
        dialog.draft.bit_size = 4; // spills the storage unit
        p.dialogs.open_bitfield(dialog);

        p.apply_bitfield_dialog();
        let dialog = p.dialogs.bitfield.as_ref().unwrap();
        assert!(dialog.error.is_some());
        let m = p.model.as_composite().unwrap();
        assert_eq!(m.view_composite.as_ref().unwrap().num_components(), 1);
    }
}
