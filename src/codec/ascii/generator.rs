use super::tokenizer::{BRANCH_END, BRANCH_MIDDLE, PIPE_INDENT, SPACE_INDENT};
use crate::codec::push_label;
use crate::tree::Node;

/// Renders the forest as a box-drawing diagram, one line per node.
pub(super) fn generate<I>(forest: &[Node<I>]) -> String {
    let mut out = String::new();
    for root in forest {
        push_label(&mut out, root);
        if let Some(children) = root.children() {
            write_children(&mut out, children, "");
        }
    }
    out
}

fn write_children<I>(out: &mut String, children: &[Node<I>], prefix: &str) {
    for (index, child) in children.iter().enumerate() {
        let is_last = index + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if is_last { BRANCH_END } else { BRANCH_MIDDLE });
        push_label(out, child);

        if let Some(grandchildren) = child.children() {
            let indent = if is_last { SPACE_INDENT } else { PIPE_INDENT };
            write_children(out, grandchildren, &format!("{prefix}{indent}"));
        }
    }
}
