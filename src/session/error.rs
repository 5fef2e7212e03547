use snafu::Snafu;

use crate::tree::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SessionError {
    #[snafu(display("The tree cannot be edited while the text has errors"))]
    TreeLocked,
    #[snafu(display("No node with id {}", id))]
    NodeNotFound { id: NodeId },
    #[snafu(display("'{}' is a file and cannot have children", name))]
    NotAFolder { name: String },
    #[snafu(display("A sibling named '{}' already exists", name))]
    DuplicateName { name: String },
    #[snafu(display("'{}' is not a valid node name", name))]
    InvalidName { name: String },
    #[snafu(display("Folder '{}' still has children", name))]
    FolderNotEmpty { name: String },
}
