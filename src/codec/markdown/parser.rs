use tracing::debug;

use super::line::{leading_indent, parse_list_item, ListItem};
use crate::codec::{Diagnostics, ParseError, ParseErrorKind};
use crate::tree::{is_folder_name, join_path, Node, NodeKind, ParsedNode};

#[derive(Debug)]
struct ListNode {
    name: String,
    comment: Option<String>,
    children: Vec<ListNode>,
}

impl ListNode {
    fn new(item: &ListItem<'_>) -> Self {
        Self {
            name: item.name.to_string(),
            comment: item.comment.map(str::to_string),
            children: Vec::new(),
        }
    }

    /// In the list grammar only the trailing `/` makes a folder.
    fn into_parsed(self, parent_path: &str) -> ParsedNode {
        let path = join_path(parent_path, &self.name);
        let kind = if is_folder_name(&self.name) {
            NodeKind::Folder(
                self.children
                    .into_iter()
                    .map(|child| child.into_parsed(&path))
                    .collect(),
            )
        } else {
            NodeKind::File
        };

        Node {
            id: (),
            name: self.name,
            path,
            comment: self.comment,
            kind,
        }
    }
}

#[derive(Debug, Default)]
struct OpenItems {
    stack: Vec<(ListNode, usize)>,
    roots: Vec<ListNode>,
}

impl OpenItems {
    fn close_until(&mut self, level: usize) {
        while self.stack.last().is_some_and(|(_, open)| *open >= level) {
            if let Some((node, _)) = self.stack.pop() {
                match self.stack.last_mut() {
                    Some((parent, _)) => parent.children.push(node),
                    None => self.roots.push(node),
                }
            }
        }
    }

    /// Already closed siblings of a node about to be opened.
    fn siblings(&self) -> &[ListNode] {
        match self.stack.last() {
            Some((parent, _)) => &parent.children,
            None => &self.roots,
        }
    }

    fn finish(mut self) -> Vec<ListNode> {
        self.close_until(0);
        self.roots
    }
}

/// Parses an indented list, routing every error through `diagnostics`.
pub(super) fn parse(text: &str, diagnostics: &mut Diagnostics) -> Result<Vec<ParsedNode>, ParseError> {
    let lines: Vec<(usize, &str)> = text
        .split('\n')
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim_end_matches('\r')))
        .filter(|(_, raw)| !raw.trim().is_empty())
        .collect();

    let mut open = OpenItems::default();

    for (position, &(line, raw)) in lines.iter().enumerate() {
        let item = match parse_list_item(raw, line) {
            Ok(item) => item,
            Err(error) => {
                diagnostics.report(error)?;
                continue;
            }
        };

        // Look ahead before touching the stack: a file cannot open a deeper level.
        if !is_folder_name(item.name) {
            let next_is_deeper = lines
                .get(position + 1)
                .is_some_and(|&(_, next)| leading_indent(next) > item.indent);
            if next_is_deeper {
                diagnostics.report(ParseError::new(
                    ParseErrorKind::InvalidFileNode,
                    line,
                    item.content_end_column,
                    item.name,
                ))?;
            }
        }

        let level = item.level();
        open.close_until(level);

        if open.siblings().iter().any(|sibling| sibling.name == item.name) {
            diagnostics.report(ParseError::new(
                ParseErrorKind::DuplicateNodeName,
                line,
                item.content_end_column,
                item.name,
            ))?;
        }
        open.stack.push((ListNode::new(&item), level));
    }

    let forest: Vec<_> = open
        .finish()
        .into_iter()
        .map(|root| root.into_parsed(""))
        .collect();
    debug!("Parsed markdown list into {} root node(s)", forest.len());
    Ok(forest)
}
