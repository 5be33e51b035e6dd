//! "Add Bitfield" popup action.
//!
//! In aligned mode the bitfield is inserted directly before the selected
//! component (or appended from the at-end row) and packing does the layout.
//! In unaligned mode explicit placement is required, so the action opens the
//! bitfield editor dialog instead and the insertion happens on accept.

use log::debug;

use crate::dialogs::bitfield::{BitFieldEditorDialog, Placement};
use crate::editor::model::{CompEditorModel, EditorModel, ModelNotification, Row};
use crate::entities::{Component, Composite, DataType};

use super::{ActionContext, ActionMeta, BITFIELD_ACTION_GROUP, EditorAction};

pub const ADD_BITFIELD_ACTION_NAME: &str = "Add Bitfield";

const META: ActionMeta = ActionMeta {
    name: ADD_BITFIELD_ACTION_NAME,
    group: BITFIELD_ACTION_GROUP,
    popup_path: &[ADD_BITFIELD_ACTION_NAME],
    description: "Add a bitfield at the position of a selected component",
};

pub struct AddBitFieldAction {
    enabled: bool,
}

impl AddBitFieldAction {
    /// Panics when handed a non-composite editor model; only the composite
    /// editor registers this action.
    pub fn new(model: &EditorModel) -> Self {
        assert!(
            model.is_composite_editor(),
            "AddBitFieldAction requires a composite editor model, got {}",
            model.kind_name()
        );
        Self { enabled: false }
    }

    /// Enabled with a composite loaded and exactly one selected row that is
    /// not the flexible-array pseudo-row. The at-end row qualifies (append).
    fn allowed(model: &CompEditorModel) -> bool {
        model.view_composite.is_some()
            && model.num_selected_rows() == 1
            && !model.is_flexible_array_selection()
    }
}

impl EditorAction for AddBitFieldAction {
    fn meta(&self) -> &ActionMeta {
        &META
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn recompute_enablement(&mut self, model: &EditorModel) {
        self.enabled = model.as_composite().is_some_and(Self::allowed);
    }

    fn run(&mut self, ctx: &mut ActionContext) {
        let Some(model) = ctx.model.as_composite_mut() else {
            return;
        };
        // The popup can outlive the state it was built for; re-check.
        if !Self::allowed(model) {
            return;
        }
        let row = model.selected_rows()[0];

        if model.is_aligned() {
            // Base is inherited only when the neighbour is itself a bitfield;
            // otherwise the insertion routine falls back to its default.
            let (ordinal, base) = match model.row(row) {
                Some(Row::Component(ordinal)) => {
                    let base = model.component(row).and_then(Component::base_data_type);
                    (Some(ordinal), base)
                }
                Some(Row::AtEnd) => (None, None),
                _ => return,
            };
            if model.insert_bitfield(ordinal, base).is_none() {
                debug!("bitfield insertion rejected at row {row}");
            }
        } else {
            let placement = match model.row(row) {
                Some(Row::Component(_)) => Placement::FromRow(row),
                Some(Row::AtEnd) => {
                    // No component to anchor on; hand the dialog the append
                    // offset directly instead of a row placement
                    let len = model.view_composite.as_ref().map(Composite::len).unwrap_or(0);
                    Placement::AtOffset(len as u64)
                }
                _ => return,
            };
            let base = ctx
                .preferred_base
                .unwrap_or_else(DataType::default_bitfield_base);
            ctx.dialogs
                .open_bitfield(BitFieldEditorDialog::new(model, placement, base));
        }
        ctx.table.request_focus();
    }
}

/// Redraw the table, refresh composite info, then select `ordinal`.
///
/// Used after a dialog-driven insertion; the order matters because the
/// selection must land on rows the redrawn table actually has.
pub fn refresh_table_and_selection(model: &mut CompEditorModel, ordinal: usize) {
    model.fire_table_data_changed();
    model.composite_info_changed();
    model.select_row(ordinal);
    debug_assert!(matches!(
        model.pending_notifications(),
        [.., ModelNotification::DataChanged, ModelNotification::InfoChanged]
    ));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::event_bus::EventBus;
    use crate::dialogs::DialogHost;
    use crate::editor::model::EnumEditorModel;
    use crate::entities::{
        Component, Composite, CompositeKind, DataTypeManager, Packing,
    };
    use crate::widgets::comp_table::TableState;

    fn composite_model(packing: Packing) -> EditorModel {
        let mut composite = Composite::new("s", CompositeKind::Structure, packing);
        composite.push(Component::plain(DataType::Int32, 0));
        composite.push(Component::plain(DataType::Char, 4));
        EditorModel::Composite(CompEditorModel::new(Some(composite)))
    }

    struct Fixture {
        model: EditorModel,
        table: TableState,
        dtm: Arc<DataTypeManager>,
        dialogs: DialogHost,
        bus: EventBus,
    }

    impl Fixture {
        fn new(packing: Packing) -> Self {
            Self {
                model: composite_model(packing),
                table: TableState::default(),
                dtm: Arc::new(DataTypeManager::builtin()),
                dialogs: DialogHost::default(),
                bus: EventBus::new(),
            }
        }

        fn run(&mut self, action: &mut AddBitFieldAction, preferred: Option<DataType>) {
            let emitter = self.bus.emitter();
            let mut ctx = ActionContext {
                model: &mut self.model,
                table: &mut self.table,
                dtm: &self.dtm,
                dialogs: &mut self.dialogs,
                events: &emitter,
                preferred_base: preferred,
            };
            action.run(&mut ctx);
        }
    }

    #[test]
    #[should_panic(expected = "composite editor model")]
    fn test_construction_rejects_enum_editor() {
        let model = EditorModel::Enumeration(EnumEditorModel::default());
        let _ = AddBitFieldAction::new(&model);
    }

    #[test]
    fn test_enablement_predicate() {
        let mut model = composite_model(Packing::Aligned);
        let mut action = AddBitFieldAction::new(&model);
        assert!(!action.is_enabled());

        // Single component row
        model.as_composite_mut().unwrap().set_selection(vec![0]);
        action.recompute_enablement(&model);
        assert!(action.is_enabled());

        // At-end row also qualifies
        model.as_composite_mut().unwrap().set_selection(vec![2]);
        action.recompute_enablement(&model);
        assert!(action.is_enabled());

        // Multi-row selection does not
        model.as_composite_mut().unwrap().set_selection(vec![0, 1]);
        action.recompute_enablement(&model);
        assert!(!action.is_enabled());

        // Neither does no selection
        model.as_composite_mut().unwrap().set_selection(vec![]);
        action.recompute_enablement(&model);
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_flex_array_row_disables() {
        let mut model = composite_model(Packing::Aligned);
        {
            let m = model.as_composite_mut().unwrap();
            m.view_composite.as_mut().unwrap().flex_array = Some(DataType::Char);
            m.set_selection(vec![2]); // the flex row
        }
        let mut action = AddBitFieldAction::new(&model);
        action.recompute_enablement(&model);
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_no_composite_disables() {
        let model = EditorModel::Composite(CompEditorModel::new(None));
        let mut action = AddBitFieldAction::new(&model);
        action.recompute_enablement(&model);
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_aligned_insert_before_selected_row() {
        let mut fx = Fixture::new(Packing::Aligned);
        fx.model.as_composite_mut().unwrap().set_selection(vec![1]);
        let mut action = AddBitFieldAction::new(&fx.model);
        fx.run(&mut action, None);

        let m = fx.model.as_composite().unwrap();
        let c = m.view_composite.as_ref().unwrap();
        assert_eq!(c.num_components(), 3);
        assert!(c.component(1).unwrap().is_bitfield());
        assert_eq!(
            c.component(1).unwrap().base_data_type(),
            Some(DataType::Int32)
        );
        // Selection follows the inserted component
        assert_eq!(m.selected_rows(), &[1]);
        assert!(fx.dialogs.bitfield.is_none());
    }

    #[test]
    fn test_aligned_append_from_at_end_row() {
        let mut fx = Fixture::new(Packing::Aligned);
        fx.model.as_composite_mut().unwrap().set_selection(vec![2]);
        let mut action = AddBitFieldAction::new(&fx.model);
        fx.run(&mut action, None);

        let m = fx.model.as_composite().unwrap();
        let c = m.view_composite.as_ref().unwrap();
        assert_eq!(c.num_components(), 3);
        assert_eq!(
            c.component(2).unwrap().base_data_type(),
            Some(DataType::Int32)
        );
        assert_eq!(m.selected_rows(), &[2]);
    }

    #[test]
    fn test_aligned_insert_inherits_base_from_selected_bitfield() {
        let mut fx = Fixture::new(Packing::Aligned);
        {
            let m = fx.model.as_composite_mut().unwrap();
            let c = m.view_composite.as_mut().unwrap();
            c.push(Component::bitfield(DataType::UInt16, 3, 0, 8));
            m.set_selection(vec![2]);
        }
        let mut action = AddBitFieldAction::new(&fx.model);
        fx.run(&mut action, None);

        let m = fx.model.as_composite().unwrap();
        let c = m.view_composite.as_ref().unwrap();
        assert_eq!(
            c.component(2).unwrap().base_data_type(),
            Some(DataType::UInt16)
        );
    }

    #[test]
    fn test_aligned_insert_notification_order() {
        let mut fx = Fixture::new(Packing::Aligned);
        fx.model.as_composite_mut().unwrap().set_selection(vec![0]);
        let mut action = AddBitFieldAction::new(&fx.model);
        fx.run(&mut action, None);

        let m = fx.model.as_composite_mut().unwrap();
        assert_eq!(
            m.take_notifications(),
            vec![
                ModelNotification::DataChanged,
                ModelNotification::InfoChanged
            ]
        );
    }

    #[test]
    fn test_unaligned_opens_dialog_instead() {
        let mut fx = Fixture::new(Packing::Unaligned);
        fx.model.as_composite_mut().unwrap().set_selection(vec![1]);
        let mut action = AddBitFieldAction::new(&fx.model);
        fx.run(&mut action, None);

        // No direct mutation
        let m = fx.model.as_composite().unwrap();
        assert_eq!(m.view_composite.as_ref().unwrap().num_components(), 2);

        let dialog = fx.dialogs.bitfield.as_ref().unwrap();
        assert_eq!(dialog.placement(), Placement::FromRow(1));
        // Byte offset pre-filled from the clicked component
        assert_eq!(dialog.draft().byte_offset, 4);
    }

    #[test]
    fn test_unaligned_at_end_row_places_past_the_end() {
        let mut fx = Fixture::new(Packing::Unaligned);
        fx.model.as_composite_mut().unwrap().set_selection(vec![2]);
        let mut action = AddBitFieldAction::new(&fx.model);
        fx.run(&mut action, None);

        let dialog = fx.dialogs.bitfield.as_ref().unwrap();
        assert_eq!(dialog.placement(), Placement::AtOffset(5));
        assert_eq!(dialog.draft().byte_offset, 5);
    }

    #[test]
    fn test_run_requests_table_focus() {
        for packing in [Packing::Aligned, Packing::Unaligned] {
            let mut fx = Fixture::new(packing);
            fx.model.as_composite_mut().unwrap().set_selection(vec![0]);
            let mut action = AddBitFieldAction::new(&fx.model);
            fx.run(&mut action, None);
            assert!(fx.table.take_focus_request());
        }
    }

    #[test]
    fn test_stale_run_is_a_no_op() {
        let mut fx = Fixture::new(Packing::Aligned);
        let mut action = AddBitFieldAction::new(&fx.model);
        // Enabled against an old state, then the selection went away
        fx.model.as_composite_mut().unwrap().set_selection(vec![0]);
        action.recompute_enablement(&fx.model);
        fx.model.as_composite_mut().unwrap().set_selection(vec![]);
        fx.run(&mut action, None);

        let m = fx.model.as_composite().unwrap();
        assert_eq!(m.view_composite.as_ref().unwrap().num_components(), 2);
        assert!(!fx.table.take_focus_request());
    }

    #[test]
    fn test_refresh_selects_clamped_ordinal() {
        let mut model = CompEditorModel::new(Some(Composite::new(
            "s",
            CompositeKind::Structure,
            Packing::Aligned,
        )));
        model.view_composite.as_mut().unwrap().push(Component::plain(DataType::Int32, 0));
        refresh_table_and_selection(&mut model, 42);
        assert_eq!(
            model.take_notifications(),
            vec![
                ModelNotification::DataChanged,
                ModelNotification::InfoChanged
            ]
        );
        assert_eq!(model.selected_rows(), &[1]); // clamped to the at-end row
    }
}
