//! Labeled tree representation shared by every codec.
//!
//! A document is a forest of nodes. Each node is either a file (no children
//! at all) or a folder (an ordered, possibly empty list of children). The
//! same shape is used before and after reconciliation, only the identifier
//! type differs: freshly parsed nodes carry `()` and committed nodes carry a
//! [`NodeId`].

mod id;
mod node;
mod path;

pub use id::{IdAllocator, NodeId, SequentialIdAllocator};
pub use node::{Node, NodeKind, ParsedNode, TreeNode};
pub use path::{ensure_trailing_slash, is_folder_name, join_path, refresh_paths, strip_trailing_slash};

/// An ordered sequence of committed root nodes.
pub type Forest = Vec<TreeNode>;
