//! Composite data types: structures and unions.
//!
//! A composite is an ordered list of components indexed by ordinal. Layout is
//! either *aligned* (offsets recomputed with compiler-style rules, user edits
//! by ordinal) or *unaligned* (offsets are explicit and authoritative, user
//! edits by byte offset).
//!
//! # Aligned bitfield packing
//!
//! Consecutive bitfields pack LSB-first into a storage unit of their base
//! type: a bitfield joins the open unit while the unit has the same base size
//! and enough bits left, otherwise a new unit is started at the next aligned
//! offset. A plain component always closes the open unit.

use log::debug;
use serde::{Deserialize, Serialize};

use super::component::{Component, ComponentKind};
use super::data_type::{BitFieldSpec, DataType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeKind {
    Structure,
    Union,
}

impl CompositeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeKind::Structure => "Structure",
            CompositeKind::Union => "Union",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Packing {
    /// Compiler-managed layout: offsets are derived from alignment rules.
    Aligned,
    /// Explicit layout: offsets are user data and never recomputed.
    Unaligned,
}

/// A structure or union under edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    pub name: String,
    pub description: String,
    pub kind: CompositeKind,
    pub packing: Packing,
    pub components: Vec<Component>,
    /// Trailing variable-length pseudo-component. Never participates in
    /// layout and cannot host a bitfield insertion.
    pub flex_array: Option<DataType>,
    /// Minimum length of an unaligned composite (grows with placements).
    explicit_len: usize,
}

fn align_up(value: usize, align: usize) -> usize {
    debug_assert!(align > 0);
    value.div_ceil(align) * align
}

impl Composite {
    pub fn new(name: impl Into<String>, kind: CompositeKind, packing: Packing) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            packing,
            components: Vec::new(),
            flex_array: None,
            explicit_len: 0,
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.packing == Packing::Aligned
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, ordinal: usize) -> Option<&Component> {
        self.components.get(ordinal)
    }

    /// Strictest alignment among the components (1 for unaligned composites).
    pub fn alignment(&self) -> usize {
        if !self.is_aligned() {
            return 1;
        }
        self.components
            .iter()
            .map(|c| match &c.kind {
                ComponentKind::Plain(dt) => dt.alignment(),
                ComponentKind::Bitfield { base, .. } => base.alignment(),
            })
            .max()
            .unwrap_or(1)
    }

    /// Total byte length of the composite.
    pub fn len(&self) -> usize {
        let end = self
            .components
            .iter()
            .map(Component::end_offset)
            .max()
            .unwrap_or(0);
        match self.packing {
            Packing::Aligned => align_up(end, self.alignment().max(1)),
            Packing::Unaligned => end.max(self.explicit_len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.flex_array.is_none()
    }

    /// Append a component while building; aligned layout is recomputed.
    pub fn push(&mut self, component: Component) {
        self.components.push(component);
        if self.is_aligned() {
            self.recompute_layout();
        }
    }

    pub fn set_packing(&mut self, packing: Packing) {
        if self.packing == packing {
            return;
        }
        self.packing = packing;
        if self.is_aligned() {
            self.recompute_layout();
        }
    }

    /// Reassign offsets of an aligned composite. No-op for unaligned ones.
    pub fn recompute_layout(&mut self) {
        if !self.is_aligned() {
            return;
        }
        if self.kind == CompositeKind::Union {
            for comp in &mut self.components {
                comp.offset = 0;
                if let ComponentKind::Bitfield { bit_offset, .. } = &mut comp.kind {
                    *bit_offset = 0;
                }
            }
            return;
        }

        let mut cursor = 0usize;
        // Open storage unit: (offset, unit byte length, bits used so far)
        let mut unit: Option<(usize, usize, u8)> = None;
        for comp in &mut self.components {
            match &mut comp.kind {
                ComponentKind::Plain(dt) => {
                    unit = None;
                    cursor = align_up(cursor, dt.alignment());
                    comp.offset = cursor;
                    cursor += dt.len();
                }
                ComponentKind::Bitfield {
                    base,
                    bit_size,
                    bit_offset,
                } => match unit {
                    Some((unit_offset, unit_len, used))
                        if unit_len == base.len() && used + *bit_size <= base.bit_capacity() =>
                    {
                        comp.offset = unit_offset;
                        *bit_offset = used;
                        unit = Some((unit_offset, unit_len, used + *bit_size));
                    }
                    _ => {
                        cursor = align_up(cursor, base.alignment());
                        comp.offset = cursor;
                        *bit_offset = 0;
                        unit = Some((cursor, base.len(), *bit_size));
                        cursor += base.len();
                    }
                },
            }
        }
    }

    /// Insert a new bitfield component before `ordinal` (append when `None`).
    ///
    /// This is the direct insertion routine used by the aligned editing path.
    /// The base type defaults to `int` and the bit width to 1; the component
    /// starts unnamed and can be renamed later. Returns the ordinal of the
    /// inserted component, or `None` (composite unchanged) when the ordinal
    /// is out of range or the base type cannot host a bitfield.
    pub fn insert_bitfield(
        &mut self,
        ordinal: Option<usize>,
        base: Option<DataType>,
    ) -> Option<usize> {
        let base = base.unwrap_or_else(DataType::default_bitfield_base);
        let spec = BitFieldSpec::new(base, 1)?;
        let ordinal = match ordinal {
            Some(o) if o > self.components.len() => return None,
            Some(o) => o,
            None => self.components.len(),
        };
        // Unaligned composites keep explicit offsets: a new component takes
        // the offset of the one it displaces, or goes past the end.
        let offset = self
            .components
            .get(ordinal)
            .map(|c| c.offset)
            .unwrap_or_else(|| self.len());
        self.components
            .insert(ordinal, Component::bitfield(spec.base, spec.bit_size, 0, offset));
        if self.is_aligned() {
            self.recompute_layout();
        }
        debug!(
            "inserted {}-bit {} bitfield at ordinal {} of {}",
            spec.bit_size,
            spec.base.name(),
            ordinal,
            self.name
        );
        Some(ordinal)
    }

    /// Free-form bitfield placement for unaligned composites.
    ///
    /// Places a bitfield at an explicit byte/bit position, keeping the
    /// component list sorted by (offset, bit offset). The bit range must fit
    /// inside one storage unit. Placement is free-form: explicit layout is
    /// user-managed and overlapping ranges are the user's choice. Returns the
    /// resulting ordinal, or `None` (composite unchanged) on an aligned
    /// composite or an invalid bit range.
    pub fn insert_bitfield_at(
        &mut self,
        spec: BitFieldSpec,
        offset: usize,
        bit_offset: u8,
        name: Option<String>,
    ) -> Option<usize> {
        if self.is_aligned() {
            return None;
        }
        if u16::from(bit_offset) + u16::from(spec.bit_size) > u16::from(spec.base.bit_capacity()) {
            return None;
        }
        let sort_key = |c: &Component| {
            let bits = match &c.kind {
                ComponentKind::Bitfield { bit_offset, .. } => *bit_offset,
                ComponentKind::Plain(_) => 0,
            };
            (c.offset, bits)
        };
        let ordinal = self
            .components
            .partition_point(|c| sort_key(c) <= (offset, bit_offset));
        let mut component = Component::bitfield(spec.base, spec.bit_size, bit_offset, offset);
        component.field_name = name;
        self.components.insert(ordinal, component);
        self.explicit_len = self.explicit_len.max(offset + spec.base.len());
        Some(ordinal)
    }

    /// Remove the component at `ordinal`; aligned layout is recomputed.
    pub fn remove_component(&mut self, ordinal: usize) -> Option<Component> {
        if ordinal >= self.components.len() {
            return None;
        }
        let removed = self.components.remove(ordinal);
        if self.is_aligned() {
            self.recompute_layout();
        }
        Some(removed)
    }
}
