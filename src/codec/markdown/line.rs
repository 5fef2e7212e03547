use crate::codec::{split_comment, ParseError, ParseErrorKind};

/// Spaces per nesting level.
pub(super) const INDENT_UNIT: usize = 2;

/// A well-formed `- name  # comment` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ListItem<'a> {
    /// Leading whitespace, in characters.
    pub indent: usize,
    pub name: &'a str,
    pub comment: Option<&'a str>,
    /// Column right after the trimmed content, comment included, where
    /// name-level errors point.
    pub content_end_column: usize,
    /// Byte offset right after the name within the line.
    pub name_end: usize,
}

impl ListItem<'_> {
    pub fn level(&self) -> usize {
        self.indent / INDENT_UNIT
    }
}

pub(super) fn leading_indent(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

/// Checks one non-blank line against the list grammar.
///
/// Structural problems (dash, space, content) are reported before the
/// indentation width, matching the order a reader fixes them in.
pub(super) fn parse_list_item(raw: &str, line: usize) -> Result<ListItem<'_>, ParseError> {
    let body = raw.trim_start();
    let indent_bytes = raw.len() - body.len();
    let indent = leading_indent(raw);
    let dash_column = indent + 1;

    let Some(after_dash) = body.strip_prefix('-') else {
        return Err(ParseError::new(
            ParseErrorKind::MissingDash,
            line,
            dash_column,
            body.trim_end(),
        ));
    };
    let Some(content) = after_dash.strip_prefix(' ') else {
        return Err(ParseError::new(
            ParseErrorKind::MissingSpace,
            line,
            dash_column + 1,
            body.trim_end(),
        ));
    };
    if content.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::MissingContent,
            line,
            dash_column + 2,
            body.trim_end(),
        ));
    }
    if content.starts_with(char::is_whitespace) {
        return Err(ParseError::new(
            ParseErrorKind::InvalidFormat,
            line,
            dash_column + 1,
            body.trim_end(),
        ));
    }
    if indent % INDENT_UNIT != 0 {
        return Err(ParseError::new(
            ParseErrorKind::InvalidIndentation,
            line,
            indent,
            body.trim_end(),
        ));
    }

    let (name, comment) = split_comment(content);
    if name.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyNodeName,
            line,
            dash_column + 2,
            content.trim(),
        ));
    }

    // `content` starts right after "- " and the name is its trimmed prefix.
    let name_end = indent_bytes + 2 + name.len();
    Ok(ListItem {
        indent,
        name,
        comment,
        content_end_column: dash_column + 2 + content.trim().chars().count(),
        name_end,
    })
}
