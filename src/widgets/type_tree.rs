//! Type tree panel.
//!
//! Shows the built-in types grouped by category. Picking an integer type
//! makes it the preferred base for subsequent bitfield insertions.

use eframe::egui;
use egui_ltreeview::TreeView;

use crate::editor::editor_events::SetPreferredBaseTypeEvent;
use crate::entities::{DataType, DataTypeManager};

use super::actions::ActionQueue;

// Directory node ids start here; leaf ids index the flattened type list
const DIR_ID_BASE: usize = 10_000;

pub struct TypeTree;

impl TypeTree {
    pub fn ui(ui: &mut egui::Ui, dtm: &DataTypeManager) -> ActionQueue {
        let mut queue = ActionQueue::new();

        // Leaf id -> type, rebuilt every frame in category order
        let mut leaves: Vec<DataType> = Vec::new();

        let tree_id = ui.make_persistent_id("type_tree_view");
        let (_response, actions) = TreeView::new(tree_id).show(ui, |builder| {
            for (cat_index, (category, types)) in dtm.categories().enumerate() {
                builder.dir(DIR_ID_BASE + cat_index, category);
                for dt in types {
                    builder.leaf(leaves.len(), dt.name());
                    leaves.push(*dt);
                }
                builder.close_dir();
            }
        });

        for action in actions {
            if let egui_ltreeview::Action::SetSelected(node_ids) = action
                && let Some(&node_id) = node_ids.first()
                && let Some(dt) = leaves.get(node_id)
            {
                queue.send(SetPreferredBaseTypeEvent(*dt));
            }
        }

        queue
    }
}
