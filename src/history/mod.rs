//! Undo and redo over (tree, text) snapshots.

mod stack;
mod state;

pub use stack::History;
pub use state::{HistoryEntry, TextState, TreeState};
