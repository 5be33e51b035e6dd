//! Modal dialogs.

pub mod bitfield;
pub mod confirm;
pub mod prefs;

pub use bitfield::BitFieldEditorDialog;
pub use confirm::ConfirmDialog;

/// Open modal dialogs, owned by the editor provider.
#[derive(Default)]
pub struct DialogHost {
    pub bitfield: Option<BitFieldEditorDialog>,
    pub confirm: Option<ConfirmDialog>,
}

impl DialogHost {
    /// Open (or replace) the bitfield editor dialog.
    pub fn open_bitfield(&mut self, dialog: BitFieldEditorDialog) {
        self.bitfield = Some(dialog);
    }

    pub fn close_bitfield(&mut self) {
        self.bitfield = None;
    }

    /// Open (or replace) the confirmation prompt.
    pub fn open_confirm(&mut self, dialog: ConfirmDialog) {
        self.confirm = Some(dialog);
    }

    pub fn close_confirm(&mut self) {
        self.confirm = None;
    }
}
