use super::line::INDENT_UNIT;
use crate::codec::push_label;
use crate::tree::Node;

pub(super) fn generate<I>(forest: &[Node<I>]) -> String {
    let mut out = String::new();
    write_items(&mut out, forest, 0);
    out
}

fn write_items<I>(out: &mut String, nodes: &[Node<I>], level: usize) {
    for node in nodes {
        out.extend(std::iter::repeat_n(' ', level * INDENT_UNIT));
        out.push_str("- ");
        push_label(out, node);
        if let Some(children) = node.children() {
            write_items(out, children, level + 1);
        }
    }
}
