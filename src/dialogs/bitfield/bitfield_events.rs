//! Bitfield editor dialog events.

/// Insert was clicked with a valid draft; the app applies the placement.
#[derive(Clone, Debug)]
pub struct BitFieldInsertEvent;

/// Cancel was clicked or the window was closed.
#[derive(Clone, Debug)]
pub struct BitFieldCancelEvent;
