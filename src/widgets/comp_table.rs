//! Component table widget.
//!
//! Renders the composite as a table of rows (components, the flexible-array
//! pseudo-row, and the at-end row used to append). All interaction goes out
//! through the action queue: selection changes and popup menu invocations are
//! events, the app applies them after the frame.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::actions::ActionMeta;
use crate::editor::editor_events::{ActionInvokedEvent, SelectionChangedEvent};
use crate::editor::model::{CompEditorModel, Row};

use super::actions::ActionQueue;

/// Per-provider table UI state.
#[derive(Default)]
pub struct TableState {
    /// Anchor row for shift-click range selection.
    pub anchor: Option<usize>,
    /// Scroll the named row into view on the next frame.
    pub scroll_to: Option<usize>,
    focus_requested: bool,
}

impl TableState {
    /// Ask the table to grab keyboard focus on the next frame.
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

/// Selection arithmetic for clicks with modifiers.
///
/// Shift extends from the anchor, ctrl toggles the clicked row, a plain click
/// replaces the selection.
pub fn compute_selection(
    current: &[usize],
    anchor: Option<usize>,
    clicked: usize,
    shift: bool,
    ctrl: bool,
) -> Vec<usize> {
    if shift {
        let a = anchor.unwrap_or(clicked);
        let (lo, hi) = if a <= clicked { (a, clicked) } else { (clicked, a) };
        (lo..=hi).collect()
    } else if ctrl {
        let mut selection = current.to_vec();
        match selection.iter().position(|r| *r == clicked) {
            Some(pos) => {
                selection.remove(pos);
            }
            None => {
                selection.push(clicked);
                selection.sort_unstable();
            }
        }
        selection
    } else {
        vec![clicked]
    }
}

pub struct CompTable;

impl CompTable {
    /// Render the table for `model`. `popup_actions` pairs each action's meta
    /// with its current enablement.
    pub fn ui(
        ui: &mut egui::Ui,
        model: &CompEditorModel,
        state: &mut TableState,
        popup_actions: &[(ActionMeta, bool)],
        show_tooltips: bool,
    ) -> ActionQueue {
        let mut queue = ActionQueue::new();

        if state.take_focus_request() {
            ui.memory_mut(|m| m.request_focus(ui.id().with("comp_table")));
        }
        let modifiers = ui.input(|i| i.modifiers);

        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .sense(egui::Sense::click())
            .column(Column::auto().at_least(36.0)) // ordinal
            .column(Column::auto().at_least(56.0)) // offset
            .column(Column::auto().at_least(48.0)) // length
            .column(Column::auto().at_least(90.0)) // type
            .column(Column::remainder().at_least(100.0)) // name
            .column(Column::remainder()); // comment

        if let Some(row_index) = state.scroll_to.take() {
            builder = builder.scroll_to_row(row_index, Some(egui::Align::Center));
        }

        builder
            .header(20.0, |mut header| {
                for title in ["#", "Offset", "Length", "Type", "Name", "Comment"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, model.row_count(), |mut table_row| {
                    let row_index = table_row.index();
                    table_row.set_selected(model.selected_rows().contains(&row_index));

                    let is_component = matches!(model.row(row_index), Some(Row::Component(_)));
                    let cells = row_cells(model, row_index);
                    for cell in cells {
                        table_row.col(|ui| {
                            if is_component {
                                ui.label(cell);
                            } else {
                                ui.weak(cell);
                            }
                        });
                    }

                    let response = table_row.response();
                    if response.clicked() {
                        let rows = compute_selection(
                            model.selected_rows(),
                            state.anchor,
                            row_index,
                            modifiers.shift,
                            modifiers.command,
                        );
                        if !modifiers.shift {
                            state.anchor = Some(row_index);
                        }
                        queue.send(SelectionChangedEvent {
                            rows,
                            anchor: state.anchor,
                        });
                    }
                    response.context_menu(|ui| {
                        let mut last_group = "";
                        for (meta, enabled) in popup_actions {
                            if !last_group.is_empty() && last_group != meta.group {
                                ui.separator();
                            }
                            last_group = meta.group;
                            let mut button =
                                ui.add_enabled(*enabled, egui::Button::new(meta.popup_label()));
                            if show_tooltips {
                                button = button.on_hover_text(meta.description);
                            }
                            if button.clicked() {
                                queue.send(ActionInvokedEvent(meta.name));
                                ui.close();
                            }
                        }
                    });
                });
            });

        queue
    }
}

/// Cell strings for one table row.
fn row_cells(model: &CompEditorModel, row_index: usize) -> [String; 6] {
    match model.row(row_index) {
        Some(Row::Component(ordinal)) => {
            let Some(c) = model.component(row_index) else {
                return Default::default();
            };
            [
                ordinal.to_string(),
                format!("0x{:x}", c.offset),
                c.len().to_string(),
                c.type_name(),
                c.display_name().to_string(),
                c.comment.clone().unwrap_or_default(),
            ]
        }
        Some(Row::FlexibleArray) => {
            let flex = model
                .view_composite
                .as_ref()
                .and_then(|c| c.flex_array)
                .map(|dt| format!("{}[0]", dt.name()))
                .unwrap_or_default();
            [
                String::new(),
                String::new(),
                "0".to_string(),
                flex,
                String::new(),
                "flexible array".to_string(),
            ]
        }
        // At-end row stays blank, it only exists as an insertion point
        Some(Row::AtEnd) | None => Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_click_replaces() {
        assert_eq!(compute_selection(&[1, 2], Some(1), 4, false, false), vec![4]);
    }

    #[test]
    fn test_ctrl_click_toggles() {
        assert_eq!(
            compute_selection(&[1, 2], Some(1), 4, false, true),
            vec![1, 2, 4]
        );
        assert_eq!(compute_selection(&[1, 2], Some(1), 2, false, true), vec![1]);
    }

    #[test]
    fn test_shift_click_extends_from_anchor() {
        assert_eq!(
            compute_selection(&[1], Some(1), 4, true, false),
            vec![1, 2, 3, 4]
        );
        // Backwards range
        assert_eq!(
            compute_selection(&[5], Some(5), 2, true, false),
            vec![2, 3, 4, 5]
        );
        // No anchor: degenerate single-row range
        assert_eq!(compute_selection(&[], None, 3, true, false), vec![3]);
    }
}
