//! A single component (field) of a composite.
//!
//! Components are addressed by ordinal: the ordinal is the component's index
//! in the composite's component list, it is not stored on the component.

use serde::{Deserialize, Serialize};

use super::data_type::DataType;

/// What the component is, as a tagged variant. The bitfield storage unit
/// (`base`) is only reachable in the `Bitfield` arm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Ordinary field of a primitive type.
    Plain(DataType),
    /// Bit range inside a storage unit of type `base`. `bit_offset` is the
    /// LSB-first position of the range inside the unit at `Component::offset`.
    Bitfield {
        base: DataType,
        bit_size: u8,
        bit_offset: u8,
    },
}

/// One field within a composite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub field_name: Option<String>,
    pub comment: Option<String>,
    /// Byte offset within the composite. Recomputed for aligned composites,
    /// authoritative for unaligned ones.
    pub offset: usize,
    pub kind: ComponentKind,
}

impl Component {
    pub fn plain(dt: DataType, offset: usize) -> Self {
        Self {
            field_name: None,
            comment: None,
            offset,
            kind: ComponentKind::Plain(dt),
        }
    }

    pub fn bitfield(base: DataType, bit_size: u8, bit_offset: u8, offset: usize) -> Self {
        Self {
            field_name: None,
            comment: None,
            offset,
            kind: ComponentKind::Bitfield {
                base,
                bit_size,
                bit_offset,
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }

    /// Byte length occupied by this component. A bitfield reports the length
    /// of its storage unit.
    pub fn len(&self) -> usize {
        match &self.kind {
            ComponentKind::Plain(dt) => dt.len(),
            ComponentKind::Bitfield { base, .. } => base.len(),
        }
    }

    pub fn is_bitfield(&self) -> bool {
        matches!(self.kind, ComponentKind::Bitfield { .. })
    }

    /// Storage-unit type for bitfield components, None otherwise.
    pub fn base_data_type(&self) -> Option<DataType> {
        match &self.kind {
            ComponentKind::Bitfield { base, .. } => Some(*base),
            ComponentKind::Plain(_) => None,
        }
    }

    /// Display string for the table's type column, e.g. `int` or `int:3`.
    pub fn type_name(&self) -> String {
        match &self.kind {
            ComponentKind::Plain(dt) => dt.name().to_string(),
            ComponentKind::Bitfield { base, bit_size, .. } => {
                format!("{}:{}", base.name(), bit_size)
            }
        }
    }

    /// One past the last byte occupied by this component.
    pub fn end_offset(&self) -> usize {
        self.offset + self.len()
    }

    /// Name shown in the table; empty string when unnamed.
    pub fn display_name(&self) -> &str {
        self.field_name.as_deref().unwrap_or("")
    }
}
