//! Conversion between box-drawing tree diagrams and indented Markdown lists,
//! with identifier-preserving reconciliation and undo/redo history.

pub mod codec;
pub mod config;
pub mod ext;
pub mod history;
pub mod reconcile;
pub mod session;
pub mod share;
pub mod tree;
