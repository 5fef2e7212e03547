use snafu::prelude::*;

use super::error::{
    DuplicateNameSnafu, FolderNotEmptySnafu, InvalidNameSnafu, NodeNotFoundSnafu, NotAFolderSnafu,
    SessionError,
};
use crate::tree::{strip_trailing_slash, IdAllocator, Node, NodeId, NodeKind, TreeNode};

/// A node to be created by a structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDraft {
    pub name: String,
    pub is_folder: bool,
    pub comment: Option<String>,
}

impl NodeDraft {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_folder: false,
            comment: None,
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_folder: true,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    fn stored_name(&self) -> Result<String, SessionError> {
        normalize_name(&self.name, self.is_folder)
    }

    fn into_node(self, name: String, id: NodeId) -> TreeNode {
        Node {
            id,
            name,
            path: String::new(),
            comment: clean_comment(self.comment),
            kind: if self.is_folder {
                NodeKind::Folder(Vec::new())
            } else {
                NodeKind::File
            },
        }
    }
}

/// Replacement values for an existing node. Children are kept.
pub type NodeUpdate = NodeDraft;

/// Trims the name and applies the folder suffix rule.
///
/// A name must be non-blank and single-line, and may not contain `#` since
/// both text formats read it as the start of a comment.
fn normalize_name(name: &str, is_folder: bool) -> Result<String, SessionError> {
    let base = strip_trailing_slash(name.trim()).trim_end();
    ensure!(
        !base.is_empty() && !base.contains(['#', '\n', '\r']),
        InvalidNameSnafu { name }
    );
    Ok(if is_folder {
        format!("{base}/")
    } else {
        base.to_string()
    })
}

fn clean_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|comment| comment.replace(['\n', '\r'], " ").trim().to_string())
        .filter(|comment| !comment.is_empty())
}

fn ensure_unique(siblings: &[TreeNode], name: &str, except: Option<&NodeId>) -> Result<(), SessionError> {
    let taken = siblings
        .iter()
        .any(|sibling| sibling.name == name && Some(&sibling.id) != except);
    ensure!(!taken, DuplicateNameSnafu { name });
    Ok(())
}

/// Appends a new node to `parent`'s children, or as a new root without a parent.
pub(super) fn insert_child<A>(
    forest: &mut Vec<TreeNode>,
    parent: Option<&NodeId>,
    draft: NodeDraft,
    ids: &mut A,
) -> Result<NodeId, SessionError>
where
    A: IdAllocator + ?Sized,
{
    let name = draft.stored_name()?;
    let siblings = match parent {
        None => forest,
        Some(parent_id) => {
            let parent = TreeNode::find_mut(forest, parent_id).context(NodeNotFoundSnafu {
                id: parent_id.clone(),
            })?;
            let parent_name = parent.name.clone();
            parent
                .children_mut()
                .context(NotAFolderSnafu { name: parent_name })?
        }
    };
    ensure_unique(siblings, &name, None)?;

    let id = ids.next_id();
    siblings.push(draft.into_node(name, id.clone()));
    Ok(id)
}

/// Appends a new node at the end of the sibling list holding `of`.
pub(super) fn insert_sibling<A>(
    forest: &mut Vec<TreeNode>,
    of: &NodeId,
    draft: NodeDraft,
    ids: &mut A,
) -> Result<NodeId, SessionError>
where
    A: IdAllocator + ?Sized,
{
    let name = draft.stored_name()?;
    let (siblings, _) =
        TreeNode::find_siblings_mut(forest, of).context(NodeNotFoundSnafu { id: of.clone() })?;
    ensure_unique(siblings, &name, None)?;

    let id = ids.next_id();
    siblings.push(draft.into_node(name, id.clone()));
    Ok(id)
}

/// Removes every listed node together with its subtree.
///
/// Unknown ids are rejected before anything is removed.
pub(super) fn remove(forest: &mut Vec<TreeNode>, ids: &[NodeId]) -> Result<usize, SessionError> {
    if let Some(missing) = ids.iter().find(|id| TreeNode::find(forest, id).is_none()) {
        return NodeNotFoundSnafu { id: missing.clone() }.fail();
    }
    Ok(remove_from(forest, ids))
}

fn remove_from(nodes: &mut Vec<TreeNode>, ids: &[NodeId]) -> usize {
    let before = nodes.len();
    nodes.retain(|node| !ids.contains(&node.id));
    let mut removed = before - nodes.len();
    for node in nodes.iter_mut() {
        if let Some(children) = node.children_mut() {
            removed += remove_from(children, ids);
        }
    }
    removed
}

/// Renames, retypes and re-comments a node in place.
pub(super) fn update(forest: &mut Vec<TreeNode>, id: &NodeId, update: NodeUpdate) -> Result<(), SessionError> {
    let name = update.stored_name()?;
    let (siblings, index) =
        TreeNode::find_siblings_mut(forest, id).context(NodeNotFoundSnafu { id: id.clone() })?;
    ensure_unique(siblings, &name, Some(id))?;

    let node = &mut siblings[index];
    if update.is_folder {
        if node.kind.is_file() {
            node.kind = NodeKind::Folder(Vec::new());
        }
    } else if node.is_folder() {
        let has_children = node.children().is_some_and(|children| !children.is_empty());
        ensure!(!has_children, FolderNotEmptySnafu { name: node.name.clone() });
        node.kind = NodeKind::File;
    }
    node.name = name;
    node.comment = clean_comment(update.comment);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::assign_fresh_ids;
    use crate::tree::{refresh_paths, ParsedNode, SequentialIdAllocator};
    use rstest::rstest;

    fn sample(ids: &mut SequentialIdAllocator) -> Vec<TreeNode> {
        let mut parsed = vec![ParsedNode::folder(
            "root",
            vec![
                ParsedNode::folder("docs", vec![ParsedNode::file("a.md")]),
                ParsedNode::file("README.md"),
            ],
        )];
        refresh_paths(&mut parsed);
        assign_fresh_ids(parsed, ids)
    }

    fn id_at(forest: &[TreeNode], path: &str) -> NodeId {
        TreeNode::pre_order(forest)
            .find(|node| node.path == path)
            .map(|node| node.id.clone())
            .unwrap()
    }

    #[rstest]
    #[case("  notes  ", false, "notes")]
    #[case("notes", true, "notes/")]
    #[case("notes/", true, "notes/")]
    #[case("notes/", false, "notes")]
    fn names_are_normalized(#[case] raw: &str, #[case] is_folder: bool, #[case] expected: &str) {
        assert_eq!(normalize_name(raw, is_folder).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("/")]
    #[case("a # b")]
    #[case("two\nlines")]
    fn bad_names_are_rejected(#[case] raw: &str) {
        assert!(matches!(normalize_name(raw, false), Err(SessionError::InvalidName { .. })));
    }

    #[test]
    fn child_goes_to_the_end_of_the_folder() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let docs = id_at(&forest, "root/docs/");

        let id = insert_child(&mut forest, Some(&docs), NodeDraft::file("b.md"), &mut ids).unwrap();
        let children = TreeNode::find(&forest, &docs).and_then(Node::children).unwrap();
        assert_eq!(children.last().map(|node| &node.id), Some(&id));
    }

    #[test]
    fn child_without_parent_is_a_new_root() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        insert_child(&mut forest, None, NodeDraft::folder("other"), &mut ids).unwrap();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].name, "other/");
    }

    #[test]
    fn files_cannot_get_children() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let readme = id_at(&forest, "root/README.md");
        let error = insert_child(&mut forest, Some(&readme), NodeDraft::file("x"), &mut ids).unwrap_err();
        assert!(matches!(error, SessionError::NotAFolder { .. }));
    }

    #[test]
    fn sibling_names_must_be_unique() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let docs = id_at(&forest, "root/docs/");
        let error = insert_sibling(&mut forest, &docs, NodeDraft::file("README.md"), &mut ids).unwrap_err();
        assert_eq!(error, SessionError::DuplicateName { name: "README.md".into() });
    }

    #[test]
    fn removing_a_folder_removes_its_subtree() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let docs = id_at(&forest, "root/docs/");
        assert_eq!(remove(&mut forest, &[docs.clone()]).unwrap(), 1);
        assert!(TreeNode::find(&forest, &docs).is_none());
        assert_eq!(TreeNode::collect_ids(&forest).len(), 2);
    }

    #[test]
    fn removing_an_unknown_id_changes_nothing() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let before = forest.clone();
        let readme = id_at(&forest, "root/README.md");
        let error = remove(&mut forest, &[readme, NodeId::from(999_u64)]).unwrap_err();
        assert!(matches!(error, SessionError::NodeNotFound { .. }));
        assert_eq!(forest, before);
    }

    #[test]
    fn update_keeps_children_and_id() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let docs = id_at(&forest, "root/docs/");
        update(&mut forest, &docs, NodeDraft::folder("guides").with_comment("how-tos")).unwrap();

        let node = TreeNode::find(&forest, &docs).unwrap();
        assert_eq!(node.name, "guides/");
        assert_eq!(node.comment(), Some("how-tos"));
        assert_eq!(node.children().map(<[_]>::len), Some(1));
    }

    #[test]
    fn non_empty_folder_cannot_become_a_file() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let docs = id_at(&forest, "root/docs/");
        let error = update(&mut forest, &docs, NodeDraft::file("docs")).unwrap_err();
        assert!(matches!(error, SessionError::FolderNotEmpty { .. }));
    }

    #[test]
    fn renaming_onto_a_sibling_is_rejected() {
        let mut ids = SequentialIdAllocator::new();
        let mut forest = sample(&mut ids);
        let readme = id_at(&forest, "root/README.md");
        assert!(update(&mut forest, &readme, NodeDraft::file("README.md")).is_ok());
        let error = update(&mut forest, &readme, NodeDraft::folder("docs")).unwrap_err();
        assert!(matches!(error, SessionError::DuplicateName { .. }));
    }
}
