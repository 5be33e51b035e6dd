//! Confirmation dialog events.

/// User confirmed; carries the editor action to run.
#[derive(Clone, Debug)]
pub struct ConfirmAcceptedEvent(pub &'static str);

/// User cancelled or closed the prompt.
#[derive(Clone, Debug)]
pub struct ConfirmDismissedEvent;
