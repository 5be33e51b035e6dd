//! Bitfield editor dialog state and placement logic.
//!
//! Used for unaligned composites only: explicit layout means the user picks
//! the byte and bit position by hand. Aligned composites insert directly and
//! let packing compute the layout, so they never open this dialog.

use crate::editor::model::CompEditorModel;
use crate::entities::{BitFieldSpec, DataType};

/// Where the new bitfield goes, derived from the clicked table row.
///
/// Serialized as a single signed integer for session persistence: a row
/// placement is stored as `-(row + 1)` so it can never be confused with a
/// non-negative byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Append at an explicit byte offset (invoked from the at-end row).
    AtOffset(u64),
    /// Insert relative to the component shown at this table row.
    FromRow(usize),
}

impl Placement {
    pub fn to_sentinel(self) -> i64 {
        match self {
            Placement::AtOffset(offset) => offset as i64,
            Placement::FromRow(row) => -(row as i64) - 1,
        }
    }

    pub fn from_sentinel(sentinel: i64) -> Self {
        if sentinel < 0 {
            Placement::FromRow((-sentinel - 1) as usize)
        } else {
            Placement::AtOffset(sentinel as u64)
        }
    }
}

/// Editable dialog fields.
#[derive(Clone, Debug)]
pub struct BitFieldDraft {
    pub base: DataType,
    pub bit_size: u8,
    pub bit_offset: u8,
    pub byte_offset: usize,
    pub field_name: String,
}

impl BitFieldDraft {
    /// Validate the draft into an insertable spec, with a user-facing error
    /// on failure.
    pub fn validate(&self) -> Result<BitFieldSpec, String> {
        let spec = BitFieldSpec::new(self.base, self.bit_size).ok_or_else(|| {
            format!(
                "Bit size must be between 1 and {} for {}",
                self.base.bit_capacity(),
                self.base.name()
            )
        })?;
        // Widened: the fields are public and u8 addition can overflow
        let end = u16::from(self.bit_offset) + u16::from(self.bit_size);
        if end > u16::from(self.base.bit_capacity()) {
            return Err(format!(
                "Bits {}..{} do not fit a {}-byte storage unit",
                self.bit_offset,
                end,
                self.base.len()
            ));
        }
        Ok(spec)
    }
}

/// State of the bitfield editor dialog.
pub struct BitFieldEditorDialog {
    placement: Placement,
    pub draft: BitFieldDraft,
    /// Validation message shown under the fields, None when insertable.
    pub error: Option<String>,
}

impl BitFieldEditorDialog {
    /// Pre-fills the byte offset from the placement: the clicked component's
    /// offset for a row placement, the offset itself otherwise.
    pub fn new(model: &CompEditorModel, placement: Placement, base: DataType) -> Self {
        let byte_offset = match placement {
            Placement::AtOffset(offset) => offset as usize,
            Placement::FromRow(row) => model.component(row).map(|c| c.offset).unwrap_or(0),
        };
        Self {
            placement,
            draft: BitFieldDraft {
                base,
                bit_size: 1,
                bit_offset: 0,
                byte_offset,
                field_name: String::new(),
            },
            error: None,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn draft(&self) -> &BitFieldDraft {
        &self.draft
    }

    /// Apply the draft to the model. Returns the new component's ordinal, or
    /// None with `self.error` set when the draft does not validate or the
    /// model rejects the placement.
    pub fn apply(&mut self, model: &mut CompEditorModel) -> Option<usize> {
        let spec = match self.draft.validate() {
            Ok(spec) => spec,
            Err(msg) => {
                self.error = Some(msg);
                return None;
            }
        };
        let name = {
            let trimmed = self.draft.field_name.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        let inserted =
            model.insert_bitfield_at(spec, self.draft.byte_offset, self.draft.bit_offset, name);
        if inserted.is_none() {
            self.error = Some("Placement rejected by the composite".to_string());
        }
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Component, Composite, CompositeKind, Packing};

    fn unaligned_model() -> CompEditorModel {
        let mut composite = Composite::new("s", CompositeKind::Structure, Packing::Unaligned);
        composite.components.push(Component::plain(DataType::Int32, 0));
        composite.components.push(Component::plain(DataType::Char, 6));
        CompEditorModel::new(Some(composite))
    }

    #[test]
    fn test_sentinel_codec() {
        assert_eq!(Placement::FromRow(0).to_sentinel(), -1);
        assert_eq!(Placement::FromRow(4).to_sentinel(), -5);
        assert_eq!(Placement::AtOffset(12).to_sentinel(), 12);

        assert_eq!(Placement::from_sentinel(-1), Placement::FromRow(0));
        assert_eq!(Placement::from_sentinel(-5), Placement::FromRow(4));
        assert_eq!(Placement::from_sentinel(0), Placement::AtOffset(0));
        assert_eq!(Placement::from_sentinel(12), Placement::AtOffset(12));
    }

    #[test]
    fn test_byte_offset_prefill() {
        let model = unaligned_model();
        let d = BitFieldEditorDialog::new(&model, Placement::FromRow(1), DataType::Int32);
        assert_eq!(d.draft().byte_offset, 6);

        let d = BitFieldEditorDialog::new(&model, Placement::AtOffset(10), DataType::Int32);
        assert_eq!(d.draft().byte_offset, 10);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = BitFieldDraft {
            base: DataType::UInt8,
            bit_size: 3,
            bit_offset: 0,
            byte_offset: 0,
            field_name: String::new(),
        };
        assert!(draft.validate().is_ok());

        draft.bit_offset = 6; // 6 + 3 > 8
        assert!(draft.validate().is_err());

        draft.bit_offset = 0;
        draft.bit_size = 0;
        assert!(draft.validate().is_err());

        draft.base = DataType::Float;
        draft.bit_size = 1;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_validation_near_u8_max() {
        // The UI clamps these ranges but the fields are public
        let draft = BitFieldDraft {
            base: DataType::UInt8,
            bit_size: 8,
            bit_offset: 255,
            byte_offset: 0,
            field_name: String::new(),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_apply_inserts_named_component() {
        let mut model = unaligned_model();
        let mut dialog =
            BitFieldEditorDialog::new(&model, Placement::FromRow(1), DataType::UInt16);
        dialog.draft.bit_size = 5;
        dialog.draft.bit_offset = 2;
        dialog.draft.field_name = "  flags  ".to_string();

        let ordinal = dialog.apply(&mut model).unwrap();
        assert!(dialog.error.is_none());
        let c = model.view_composite.as_ref().unwrap();
        let inserted = c.component(ordinal).unwrap();
        assert_eq!(inserted.offset, 6);
        assert_eq!(inserted.display_name(), "flags");
        assert_eq!(inserted.type_name(), "ushort:5");
    }

    #[test]
    fn test_apply_sets_error_on_invalid_draft() {
        let mut model = unaligned_model();
        let mut dialog =
            BitFieldEditorDialog::new(&model, Placement::AtOffset(0), DataType::UInt8);
        dialog.draft.bit_offset = 7;
        dialog.draft.bit_size = 4;
        assert!(dialog.apply(&mut model).is_none());
        assert!(dialog.error.is_some());
        assert_eq!(model.view_composite.as_ref().unwrap().num_components(), 2);
    }
}
