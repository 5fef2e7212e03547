//! Carries node identifiers across re-parses.
//!
//! A parsed node inherits the identifier of the committed node with exactly
//! the same path among its candidate siblings. Anything else, renames and
//! moves included, is treated as a brand new subtree.

use tracing::debug;

use crate::tree::{IdAllocator, Node, NodeKind, ParsedNode, TreeNode};

/// Matches `parsed` against `existing`, reusing identifiers where paths agree.
pub fn reconcile<A>(parsed: Vec<ParsedNode>, existing: &[TreeNode], ids: &mut A) -> Vec<TreeNode>
where
    A: IdAllocator + ?Sized,
{
    let mut reconciler = Reconciler::new(ids);
    let forest = reconciler.level(parsed, existing);
    debug!(
        "Reconciled forest: {} identifier(s) kept, {} minted",
        reconciler.reused, reconciler.minted
    );
    forest
}

/// Gives every node of `parsed` a new identifier.
pub fn assign_fresh_ids<A>(parsed: Vec<ParsedNode>, ids: &mut A) -> Vec<TreeNode>
where
    A: IdAllocator + ?Sized,
{
    let mut reconciler = Reconciler::new(ids);
    reconciler.level(parsed, &[])
}

struct Reconciler<'a, A: ?Sized> {
    ids: &'a mut A,
    reused: usize,
    minted: usize,
}

impl<'a, A> Reconciler<'a, A>
where
    A: IdAllocator + ?Sized,
{
    fn new(ids: &'a mut A) -> Self {
        Self {
            ids,
            reused: 0,
            minted: 0,
        }
    }

    fn level(&mut self, parsed: Vec<ParsedNode>, existing: &[TreeNode]) -> Vec<TreeNode> {
        parsed
            .into_iter()
            .map(|node| {
                let matched = existing.iter().find(|candidate| candidate.path == node.path);
                self.node(node, matched)
            })
            .collect()
    }

    fn node(&mut self, parsed: ParsedNode, matched: Option<&TreeNode>) -> TreeNode {
        let id = match matched {
            Some(existing) => {
                self.reused += 1;
                existing.id.clone()
            }
            None => {
                self.minted += 1;
                self.ids.next_id()
            }
        };

        let kind = match parsed.kind {
            NodeKind::File => NodeKind::File,
            NodeKind::Folder(children) => {
                let previous = matched.and_then(Node::children).unwrap_or_default();
                NodeKind::Folder(self.level(children, previous))
            }
        };

        Node {
            id,
            name: parsed.name,
            path: parsed.path,
            comment: parsed.comment,
            kind,
        }
    }
}
