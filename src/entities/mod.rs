//! Entities module - the type model, separated from editor state and GUI.

pub mod component;
pub mod composite;
pub mod data_type;
pub mod type_manager;

pub use component::{Component, ComponentKind};
pub use composite::{Composite, CompositeKind, Packing};
pub use data_type::{BitFieldSpec, DataType};
pub use type_manager::DataTypeManager;
