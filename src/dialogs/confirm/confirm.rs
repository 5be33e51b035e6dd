//! Confirmation dialog state.

/// Confirm-or-abort prompt shown before a destructive editor action runs.
pub struct ConfirmDialog {
    pub message: String,
    /// Editor action to run when confirmed.
    pub action: &'static str,
}

impl ConfirmDialog {
    pub fn for_action(action: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action,
        }
    }
}
