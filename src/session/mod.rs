//! Editing session tying text, tree, selection and history together.

mod edit;
mod editor;
mod error;
mod selection;

pub use edit::{NodeDraft, NodeUpdate};
pub use editor::EditorSession;
pub use error::SessionError;
pub use selection::{nodes_between, SelectMode, Selection};
