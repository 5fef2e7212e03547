use std::borrow::Cow;

use derive_more::IsVariant;

use super::path::{ensure_trailing_slash, is_folder_name, strip_trailing_slash};
use super::NodeId;

/// Distinguishes leaves from containers.
///
/// A file has no children at all, while a folder owns an ordered sequence of
/// children which may be empty.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum NodeKind<T> {
    File,
    Folder(Vec<T>),
}

/// A single node of a labeled tree.
///
/// `path` is derived from the names of the ancestors and is the key used to
/// match parsed nodes against committed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<I> {
    pub id: I,
    pub name: String,
    pub path: String,
    pub comment: Option<String>,
    pub kind: NodeKind<Node<I>>,
}

/// A committed node carrying a stable identifier.
pub type TreeNode = Node<NodeId>;

/// A freshly parsed node which has not been reconciled yet.
pub type ParsedNode = Node<()>;

impl<I> Node<I> {
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    pub fn children(&self) -> Option<&[Node<I>]> {
        match &self.kind {
            NodeKind::Folder(children) => Some(children),
            NodeKind::File => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node<I>>> {
        match &mut self.kind {
            NodeKind::Folder(children) => Some(children),
            NodeKind::File => None,
        }
    }

    /// The name as it is written in either text format.
    ///
    /// Folders always carry a trailing `/`, even if the stored name lost it.
    pub fn label(&self) -> Cow<'_, str> {
        if self.is_folder() && !is_folder_name(&self.name) {
            Cow::Owned(ensure_trailing_slash(&self.name))
        } else {
            Cow::Borrowed(&self.name)
        }
    }

    /// The name without the folder suffix, as shown in a tree view.
    pub fn display_name(&self) -> &str {
        strip_trailing_slash(&self.name)
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Copies the node and its subtree without identifiers.
    pub fn to_parsed(&self) -> ParsedNode {
        Node {
            id: (),
            name: self.name.clone(),
            path: self.path.clone(),
            comment: self.comment.clone(),
            kind: match &self.kind {
                NodeKind::File => NodeKind::File,
                NodeKind::Folder(children) => {
                    NodeKind::Folder(children.iter().map(Node::to_parsed).collect())
                }
            },
        }
    }

    /// Iterates over `forest` depth first, parents before their children.
    pub fn pre_order(forest: &[Node<I>]) -> PreOrder<'_, I> {
        PreOrder {
            stack: forest.iter().rev().collect(),
        }
    }
}

impl ParsedNode {
    pub fn file(name: impl Into<String>) -> Self {
        Node {
            id: (),
            name: name.into(),
            path: String::new(),
            comment: None,
            kind: NodeKind::File,
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<ParsedNode>) -> Self {
        Node {
            id: (),
            name: ensure_trailing_slash(&name.into()),
            path: String::new(),
            comment: None,
            kind: NodeKind::Folder(children),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl TreeNode {
    pub fn find<'a>(forest: &'a [TreeNode], id: &NodeId) -> Option<&'a TreeNode> {
        Self::pre_order(forest).find(|node| &node.id == id)
    }

    pub fn find_mut<'a>(forest: &'a mut [TreeNode], id: &NodeId) -> Option<&'a mut TreeNode> {
        for node in forest {
            if &node.id == id {
                return Some(node);
            }
            if let Some(found) = node
                .children_mut()
                .and_then(|children| Self::find_mut(children, id))
            {
                return Some(found);
            }
        }
        None
    }

    /// Returns the sibling list holding `id` together with its index.
    pub fn find_siblings_mut<'a>(
        forest: &'a mut Vec<TreeNode>,
        id: &NodeId,
    ) -> Option<(&'a mut Vec<TreeNode>, usize)> {
        if let Some(index) = forest.iter().position(|node| &node.id == id) {
            return Some((forest, index));
        }
        for node in forest.iter_mut() {
            if let Some(found) = node
                .children_mut()
                .and_then(|children| Self::find_siblings_mut(children, id))
            {
                return Some(found);
            }
        }
        None
    }

    pub fn collect_ids(forest: &[TreeNode]) -> Vec<NodeId> {
        Self::pre_order(forest).map(|node| node.id.clone()).collect()
    }
}

pub struct PreOrder<'a, I> {
    stack: Vec<&'a Node<I>>,
}

impl<'a, I> Iterator for PreOrder<'a, I> {
    type Item = &'a Node<I>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}
