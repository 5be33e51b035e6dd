//! UI widgets - modular, reusable UI components
//!
//! Each widget is self-contained and communicates via EventBus

pub mod actions;
pub mod comp_table;
pub mod type_tree;
