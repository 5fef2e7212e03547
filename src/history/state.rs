use crate::codec::ParseError;
use crate::tree::{Forest, NodeId};

/// The tree half of a snapshot, selection included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    pub tree: Forest,
    /// Insertion ordered, without duplicates.
    pub selected_node_ids: Vec<NodeId>,
    pub last_selected_id: Option<NodeId>,
}

impl TreeState {
    pub fn new(tree: Forest) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }
}

/// The text half of a snapshot.
///
/// Invalid text is kept verbatim together with the error that rejected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextState {
    pub content: String,
    pub is_valid: bool,
    pub error: Option<ParseError>,
}

impl TextState {
    pub fn valid(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(content: impl Into<String>, error: ParseError) -> Self {
        Self {
            content: content.into(),
            is_valid: false,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub tree: TreeState,
    pub text: TextState,
}
