//! Editor actions: named, enablement-tracked operations on the editor model.
//!
//! Actions live in the provider's registry. Enablement is recomputed after
//! every selection or model change and read by the table's popup menu; `run`
//! re-checks its own preconditions because the popup can race a refresh.

pub mod add_bitfield;
pub mod delete_component;

pub use add_bitfield::AddBitFieldAction;
pub use delete_component::DeleteComponentAction;

use crate::core::event_bus::EventEmitter;
use crate::dialogs::DialogHost;
use crate::editor::model::EditorModel;
use crate::entities::{DataType, DataTypeManager};
use crate::widgets::comp_table::TableState;

/// Popup menu group for bitfield-related actions.
pub const BITFIELD_ACTION_GROUP: &str = "BitField editing actions";

/// Popup menu group for plain component actions.
pub const COMPONENT_ACTION_GROUP: &str = "Component editing actions";

/// Static description of an action for menus and tooltips.
#[derive(Clone, Copy, Debug)]
pub struct ActionMeta {
    pub name: &'static str,
    pub group: &'static str,
    /// Popup menu path; the last element is the menu label.
    pub popup_path: &'static [&'static str],
    pub description: &'static str,
}

impl ActionMeta {
    pub fn popup_label(&self) -> &'static str {
        self.popup_path.last().copied().unwrap_or(self.name)
    }
}

/// Everything an action may touch while running.
///
/// Borrowed piecewise from the provider so an action can mutate the model,
/// open dialogs and steer table focus in one call.
pub struct ActionContext<'a> {
    pub model: &'a mut EditorModel,
    pub table: &'a mut TableState,
    pub dtm: &'a DataTypeManager,
    pub dialogs: &'a mut DialogHost,
    pub events: &'a EventEmitter,
    pub preferred_base: Option<DataType>,
}

pub trait EditorAction {
    fn meta(&self) -> &ActionMeta;

    /// Cached enablement, shown in the popup menu.
    fn is_enabled(&self) -> bool;

    /// Refresh the cached enablement against the current model state.
    fn recompute_enablement(&mut self, model: &EditorModel);

    /// Perform the action. Must re-validate preconditions and bail out
    /// quietly when they no longer hold.
    fn run(&mut self, ctx: &mut ActionContext);
}
