//! "Delete Components" popup action.

use crate::editor::model::{CompEditorModel, EditorModel, Row};

use super::{ActionContext, ActionMeta, COMPONENT_ACTION_GROUP, EditorAction};

pub const DELETE_ACTION_NAME: &str = "Delete Components";

const META: ActionMeta = ActionMeta {
    name: DELETE_ACTION_NAME,
    group: COMPONENT_ACTION_GROUP,
    popup_path: &[DELETE_ACTION_NAME],
    description: "Delete the selected components",
};

pub struct DeleteComponentAction {
    enabled: bool,
}

impl DeleteComponentAction {
    pub fn new(model: &EditorModel) -> Self {
        assert!(
            model.is_composite_editor(),
            "DeleteComponentAction requires a composite editor model, got {}",
            model.kind_name()
        );
        Self { enabled: false }
    }

    /// Ordinals of the selected rows, or None when the selection includes a
    /// pseudo-row (only real components can be deleted).
    fn selected_ordinals(model: &CompEditorModel) -> Option<Vec<usize>> {
        if model.num_selected_rows() == 0 {
            return None;
        }
        model
            .selected_rows()
            .iter()
            .map(|r| match model.row(*r) {
                Some(Row::Component(ordinal)) => Some(ordinal),
                _ => None,
            })
            .collect()
    }
}

impl EditorAction for DeleteComponentAction {
    fn meta(&self) -> &ActionMeta {
        &META
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn recompute_enablement(&mut self, model: &EditorModel) {
        self.enabled = model
            .as_composite()
            .is_some_and(|m| Self::selected_ordinals(m).is_some());
    }

    fn run(&mut self, ctx: &mut ActionContext) {
        let Some(model) = ctx.model.as_composite_mut() else {
            return;
        };
        let Some(ordinals) = Self::selected_ordinals(model) else {
            return;
        };
        model.remove_components(ordinals);
        ctx.table.request_focus();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::event_bus::EventBus;
    use crate::dialogs::DialogHost;
    use crate::entities::{
        Component, Composite, CompositeKind, DataType, DataTypeManager, Packing,
    };
    use crate::widgets::comp_table::TableState;

    fn model() -> EditorModel {
        let mut composite = Composite::new("s", CompositeKind::Structure, Packing::Aligned);
        composite.push(Component::plain(DataType::Int32, 0));
        composite.push(Component::plain(DataType::Char, 4));
        EditorModel::Composite(CompEditorModel::new(Some(composite)))
    }

    #[test]
    fn test_enablement_requires_component_rows_only() {
        let mut model = model();
        let mut action = DeleteComponentAction::new(&model);

        model.as_composite_mut().unwrap().set_selection(vec![0, 1]);
        action.recompute_enablement(&model);
        assert!(action.is_enabled());

        // Selection touching the at-end row disables
        model.as_composite_mut().unwrap().set_selection(vec![1, 2]);
        action.recompute_enablement(&model);
        assert!(!action.is_enabled());

        model.as_composite_mut().unwrap().set_selection(vec![]);
        action.recompute_enablement(&model);
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_run_deletes_selection() {
        let mut model = model();
        model.as_composite_mut().unwrap().set_selection(vec![0]);
        let mut action = DeleteComponentAction::new(&model);

        let mut table = TableState::default();
        let dtm = Arc::new(DataTypeManager::builtin());
        let mut dialogs = DialogHost::default();
        let bus = EventBus::new();
        let emitter = bus.emitter();
        let mut ctx = ActionContext {
            model: &mut model,
            table: &mut table,
            dtm: &dtm,
            dialogs: &mut dialogs,
            events: &emitter,
            preferred_base: None,
        };
        action.run(&mut ctx);

        let m = model.as_composite().unwrap();
        let c = m.view_composite.as_ref().unwrap();
        assert_eq!(c.num_components(), 1);
        assert_eq!(c.component(0).unwrap().type_name(), "char");
        assert!(table.take_focus_request());
    }

    #[test]
    #[should_panic(expected = "composite editor model")]
    fn test_construction_rejects_enum_editor() {
        use crate::editor::model::EnumEditorModel;
        let model = EditorModel::Enumeration(EnumEditorModel::default());
        let _ = DeleteComponentAction::new(&model);
    }
}
