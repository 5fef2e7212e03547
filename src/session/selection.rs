use crate::history::TreeState;
use crate::tree::{NodeId, TreeNode};

/// How a click extends the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Select only the target.
    #[default]
    Replace,
    /// Add or remove the target.
    Toggle,
    /// Select everything between the anchor and the target, in tree order.
    Range,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<NodeId>,
    last: Option<NodeId>,
}

impl Selection {
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn last(&self) -> Option<&NodeId> {
        self.last.as_ref()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub(super) fn from_state(state: &TreeState) -> Self {
        Self {
            ids: state.selected_node_ids.clone(),
            last: state.last_selected_id.clone(),
        }
    }

    pub(super) fn snapshot(&self, tree: &[TreeNode]) -> TreeState {
        TreeState {
            tree: tree.to_vec(),
            selected_node_ids: self.ids.clone(),
            last_selected_id: self.last.clone(),
        }
    }

    /// A range keeps the anchor; without one it behaves like a plain click.
    pub(super) fn apply(&mut self, forest: &[TreeNode], id: &NodeId, mode: SelectMode) {
        match (mode, self.last.clone()) {
            (SelectMode::Toggle, _) => {
                if let Some(index) = self.ids.iter().position(|selected| selected == id) {
                    self.ids.remove(index);
                } else {
                    self.ids.push(id.clone());
                }
                self.last = Some(id.clone());
            }
            (SelectMode::Range, Some(anchor)) => {
                self.ids = nodes_between(forest, &anchor, id);
            }
            (SelectMode::Replace, _) | (SelectMode::Range, None) => {
                self.ids = vec![id.clone()];
                self.last = Some(id.clone());
            }
        }
    }

    pub(super) fn clear(&mut self) {
        self.ids.clear();
        self.last = None;
    }

    /// Forgets ids which no longer exist in `forest`.
    pub(super) fn prune(&mut self, forest: &[TreeNode]) {
        let known = TreeNode::collect_ids(forest);
        self.ids.retain(|id| known.contains(id));
        if self.last.as_ref().is_some_and(|last| !known.contains(last)) {
            self.last = None;
        }
    }
}

/// Ids from `from` to `to` inclusive in pre-order, in either direction.
///
/// Returns nothing when either end is not part of the forest.
pub fn nodes_between(forest: &[TreeNode], from: &NodeId, to: &NodeId) -> Vec<NodeId> {
    let all = TreeNode::collect_ids(forest);
    let (Some(start), Some(end)) = (
        all.iter().position(|id| id == from),
        all.iter().position(|id| id == to),
    ) else {
        return Vec::new();
    };
    let (start, end) = (start.min(end), start.max(end));
    all[start..=end].to_vec()
}
