//! Editor models: the state behind the component table.
//!
//! `CompEditorModel` maps the composite under edit onto table rows: one row
//! per component (row index == ordinal), then the flexible-array pseudo-row
//! when present, then a synthetic at-end row used to append. Mutations queue
//! `ModelNotification`s which the app drains each frame to redraw the table
//! and refresh the header.

use crate::core::event_bus::ModelEventEmitter;
use crate::entities::{BitFieldSpec, Component, Composite, DataType};

use super::editor_events::{CompositeLoadedEvent, CompositeModifiedEvent};

/// What a table row index points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    /// A real component, addressed by its ordinal.
    Component(usize),
    /// The trailing flexible-array pseudo-row.
    FlexibleArray,
    /// The synthetic row past the last component, used to append.
    AtEnd,
}

/// Deferred UI refresh requests, drained by the app in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelNotification {
    /// The table's backing data changed (full redraw).
    DataChanged,
    /// Composite metadata may have changed (header/summary refresh).
    InfoChanged,
}

/// Model behind the composite (structure/union) editor table.
#[derive(Debug, Default)]
pub struct CompEditorModel {
    pub view_composite: Option<Composite>,
    selection: Vec<usize>,
    pending: Vec<ModelNotification>,
    emitter: ModelEventEmitter,
}

impl CompEditorModel {
    pub fn new(composite: Option<Composite>) -> Self {
        Self {
            view_composite: composite,
            selection: Vec::new(),
            pending: Vec::new(),
            emitter: ModelEventEmitter::dummy(),
        }
    }

    pub fn set_event_emitter(&mut self, emitter: ModelEventEmitter) {
        self.emitter = emitter;
    }

    /// Replace the composite under edit (None unloads the editor).
    pub fn load_composite(&mut self, composite: Option<Composite>) {
        self.view_composite = composite;
        self.selection.clear();
        self.fire_table_data_changed();
        self.composite_info_changed();
        self.emitter.emit(CompositeLoadedEvent);
    }

    // === Row mapping ===

    pub fn row_count(&self) -> usize {
        match &self.view_composite {
            Some(c) => c.num_components() + usize::from(c.flex_array.is_some()) + 1,
            None => 0,
        }
    }

    pub fn row(&self, row_index: usize) -> Option<Row> {
        let composite = self.view_composite.as_ref()?;
        let num = composite.num_components();
        if row_index < num {
            return Some(Row::Component(row_index));
        }
        if composite.flex_array.is_some() && row_index == num {
            return Some(Row::FlexibleArray);
        }
        if row_index == num + usize::from(composite.flex_array.is_some()) {
            return Some(Row::AtEnd);
        }
        None
    }

    /// Component shown at `row_index`, if that row is a real component.
    pub fn component(&self, row_index: usize) -> Option<&Component> {
        match self.row(row_index)? {
            Row::Component(ordinal) => self.view_composite.as_ref()?.component(ordinal),
            _ => None,
        }
    }

    pub fn is_at_end(&self, row_index: usize) -> bool {
        self.row(row_index) == Some(Row::AtEnd)
    }

    pub fn is_aligned(&self) -> bool {
        self.view_composite
            .as_ref()
            .map(Composite::is_aligned)
            .unwrap_or(false)
    }

    // === Selection ===

    pub fn selected_rows(&self) -> &[usize] {
        &self.selection
    }

    pub fn num_selected_rows(&self) -> usize {
        self.selection.len()
    }

    /// True when the selection is exactly the flexible-array pseudo-row.
    pub fn is_flexible_array_selection(&self) -> bool {
        self.selection.len() == 1 && self.row(self.selection[0]) == Some(Row::FlexibleArray)
    }

    /// Replace the selection. Row indices beyond the table are ignored.
    pub fn set_selection(&mut self, rows: Vec<usize>) {
        let count = self.row_count();
        self.selection = rows.into_iter().filter(|r| *r < count).collect();
    }

    /// Select a single row; indices past the end clamp to the last row, and
    /// selection on an empty table is ignored.
    pub fn select_row(&mut self, row_index: usize) {
        let count = self.row_count();
        if count == 0 {
            self.selection.clear();
            return;
        }
        self.selection = vec![row_index.min(count - 1)];
    }

    // === Mutation ===

    /// Direct bitfield insertion (aligned editing path); see
    /// [`Composite::insert_bitfield`] for the contract. The inserted row is
    /// selected on success.
    pub fn insert_bitfield(
        &mut self,
        ordinal: Option<usize>,
        base: Option<DataType>,
    ) -> Option<usize> {
        let composite = self.view_composite.as_mut()?;
        let inserted = composite.insert_bitfield(ordinal, base)?;
        self.fire_table_data_changed();
        self.composite_info_changed();
        self.select_row(inserted);
        self.emitter.emit(CompositeModifiedEvent);
        Some(inserted)
    }

    /// Free-form placement used by the bitfield dialog (unaligned editing).
    pub fn insert_bitfield_at(
        &mut self,
        spec: BitFieldSpec,
        offset: usize,
        bit_offset: u8,
        name: Option<String>,
    ) -> Option<usize> {
        let composite = self.view_composite.as_mut()?;
        let inserted = composite.insert_bitfield_at(spec, offset, bit_offset, name)?;
        self.emitter.emit(CompositeModifiedEvent);
        Some(inserted)
    }

    /// Delete components by ordinal; clamps the selection afterwards.
    pub fn remove_components(&mut self, mut ordinals: Vec<usize>) {
        let Some(composite) = self.view_composite.as_mut() else {
            return;
        };
        ordinals.sort_unstable();
        ordinals.dedup();
        for ordinal in ordinals.into_iter().rev() {
            composite.remove_component(ordinal);
        }
        self.fire_table_data_changed();
        self.composite_info_changed();
        let count = self.row_count();
        self.selection.retain(|r| *r < count);
        self.emitter.emit(CompositeModifiedEvent);
    }

    // === Refresh hooks ===

    /// Queue a table redraw notification.
    pub fn fire_table_data_changed(&mut self) {
        self.pending.push(ModelNotification::DataChanged);
    }

    /// Queue a header/summary refresh notification.
    pub fn composite_info_changed(&mut self) {
        self.pending.push(ModelNotification::InfoChanged);
    }

    pub fn pending_notifications(&self) -> &[ModelNotification] {
        &self.pending
    }

    /// Drain queued notifications in emission order.
    pub fn take_notifications(&mut self) -> Vec<ModelNotification> {
        std::mem::take(&mut self.pending)
    }
}

/// Minimal model behind the enumeration editor (sibling of the composite
/// editor; it shares the provider frame but none of the bitfield actions).
#[derive(Debug, Default)]
pub struct EnumEditorModel {
    pub name: String,
    pub entries: Vec<(String, i64)>,
    pub selection: Vec<usize>,
}

/// The editor model a provider hosts, as a tagged variant.
#[derive(Debug)]
pub enum EditorModel {
    Composite(CompEditorModel),
    Enumeration(EnumEditorModel),
}

impl EditorModel {
    pub fn as_composite(&self) -> Option<&CompEditorModel> {
        match self {
            EditorModel::Composite(m) => Some(m),
            EditorModel::Enumeration(_) => None,
        }
    }

    pub fn as_composite_mut(&mut self) -> Option<&mut CompEditorModel> {
        match self {
            EditorModel::Composite(m) => Some(m),
            EditorModel::Enumeration(_) => None,
        }
    }

    pub fn is_composite_editor(&self) -> bool {
        matches!(self, EditorModel::Composite(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            EditorModel::Composite(_) => "composite",
            EditorModel::Enumeration(_) => "enumeration",
        }
    }
}
