use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::tokenizer::{tokenize_line, TokenLine};
use crate::codec::{Diagnostics, ParseError, ParseErrorKind};
use crate::tree::{ensure_trailing_slash, is_folder_name, join_path, Node, NodeKind, ParsedNode};

/// A node as written in the diagram, before folder normalization.
#[derive(Debug)]
struct AstNode {
    name: String,
    comment: Option<String>,
    children: Vec<AstNode>,
    line: usize,
    column: usize,
}

impl AstNode {
    fn from_tokens(tokens: &TokenLine, name: &str, line: usize, column: usize) -> Self {
        Self {
            name: name.to_string(),
            comment: tokens.comment().map(|token| token.value.clone()),
            children: Vec::new(),
            line,
            column,
        }
    }

    /// A node is a folder if it has children or its name already says so.
    fn is_folder(&self) -> bool {
        !self.children.is_empty() || is_folder_name(&self.name)
    }

    fn normalized_name(&self) -> String {
        if self.is_folder() {
            ensure_trailing_slash(&self.name)
        } else {
            self.name.clone()
        }
    }

    fn into_parsed(self, parent_path: &str) -> ParsedNode {
        let is_folder = self.is_folder();
        let name = if is_folder {
            ensure_trailing_slash(&self.name)
        } else {
            self.name
        };
        let path = join_path(parent_path, &name);
        let kind = if is_folder {
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
            name,
            path,
            comment: self.comment,
            kind,
        }
    }
}

/// Open ancestors of the line being parsed, innermost last.
#[derive(Debug, Default)]
struct OpenNodes {
    stack: Vec<(AstNode, usize)>,
    roots: Vec<AstNode>,
}

impl OpenNodes {
    fn close_top(&mut self) {
        if let Some((node, _)) = self.stack.pop() {
            match self.stack.last_mut() {
                Some((parent, _)) => parent.children.push(node),
                None => self.roots.push(node),
            }
        }
    }

    fn close_until(&mut self, level: usize) {
        while self.stack.last().is_some_and(|(_, open)| *open >= level) {
            self.close_top();
        }
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.close_top();
        }
    }

    fn finish(mut self) -> Vec<AstNode> {
        self.close_all();
        self.roots
    }
}

/// Reports siblings whose names only collide once folders gain their slash,
/// such as `a` with children next to `a/`. The later line is blamed.
fn check_normalized_duplicates(
    siblings: &[AstNode],
    diagnostics: &mut Diagnostics,
) -> Result<(), ParseError> {
    let mut seen = HashMap::new();
    for node in siblings {
        if seen.insert(node.normalized_name(), node.line).is_some() {
            diagnostics.report(ParseError::new(
                ParseErrorKind::DuplicateNodeName,
                node.line,
                node.column,
                &node.name,
            ))?;
        }
        check_normalized_duplicates(&node.children, diagnostics)?;
    }
    Ok(())
}

/// Parses a diagram, routing every error through `diagnostics`.
///
/// With fail-fast diagnostics the first error is returned; with collecting
/// diagnostics the parse always runs to the end of the buffer.
pub(super) fn parse(text: &str, diagnostics: &mut Diagnostics) -> Result<Vec<ParsedNode>, ParseError> {
    if text.trim().is_empty() {
        diagnostics.report(ParseError::new(ParseErrorKind::EmptyLine, 1, 1, ""))?;
        return Ok(Vec::new());
    }

    let mut open = OpenNodes::default();
    let mut root_names = HashSet::new();

    for (index, raw) in text.split('\n').enumerate() {
        let tokens = match tokenize_line(raw, index + 1) {
            Ok(Some(tokens)) => tokens,
            Ok(None) => continue,
            Err(error) => {
                diagnostics.report(error)?;
                continue;
            }
        };
        let Some(name_token) = tokens.name() else {
            continue;
        };
        let name = name_token.value.as_str();

        if tokens.branch().is_none() {
            open.close_all();
            if !root_names.insert(name.to_string()) {
                diagnostics.report(ParseError::new(
                    ParseErrorKind::DuplicateNodeName,
                    name_token.line,
                    name_token.column,
                    name,
                ))?;
            }
            open.stack.push((
                AstNode::from_tokens(&tokens, name, name_token.line, name_token.column),
                0,
            ));
            continue;
        }

        let level = tokens.level();
        open.close_until(level);

        let Some((parent, _)) = open.stack.last() else {
            diagnostics.report(ParseError::new(
                ParseErrorKind::OrphanNode,
                name_token.line,
                1,
                name,
            ))?;
            continue;
        };

        if parent.children.iter().any(|sibling| sibling.name == name) {
            diagnostics.report(ParseError::new(
                ParseErrorKind::DuplicateNodeName,
                name_token.line,
                name_token.column,
                name,
            ))?;
        }
        open.stack.push((
            AstNode::from_tokens(&tokens, name, name_token.line, name_token.column),
            level,
        ));
    }

    let roots = open.finish();
    check_normalized_duplicates(&roots, diagnostics)?;
    let forest: Vec<_> = roots
        .into_iter()
        .map(|root| root.into_parsed(""))
        .collect();
    debug!("Parsed ASCII diagram into {} root node(s)", forest.len());
    Ok(forest)
}
