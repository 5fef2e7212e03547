//! Text formats for labeled trees.
//!
//! Two grammars are supported: the box-drawing diagram produced by tools like
//! `tree`, and an indented Markdown list with two spaces per level. Both parse
//! into the same [`ParsedNode`](crate::tree::ParsedNode) forest and share one
//! error taxonomy.

pub mod ascii;
mod error;
mod format;
pub mod markdown;

pub use ascii::AsciiCodec;
pub(crate) use error::Diagnostics;
pub use error::{Location, ParseError, ParseErrorKind, ValidationReport};
pub use format::{Codec, Format, TextFormat};
pub use markdown::MarkdownCodec;

/// Splits node content into a name and an optional comment at the first `#`.
///
/// Both halves are trimmed; a blank comment counts as no comment.
pub(crate) fn split_comment(content: &str) -> (&str, Option<&str>) {
    match content.split_once('#') {
        Some((name, comment)) => {
            let comment = comment.trim();
            (name.trim(), (!comment.is_empty()).then_some(comment))
        }
        None => (content.trim(), None),
    }
}

/// Appends a node label and its comment as one output line.
pub(crate) fn push_label<I>(out: &mut String, node: &crate::tree::Node<I>) {
    out.push_str(&node.label());
    if let Some(comment) = node.comment().filter(|comment| !comment.is_empty()) {
        out.push_str("  # ");
        out.push_str(comment);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_comment_trims_both_halves() {
        assert_eq!(split_comment(" src/  # sources "), ("src/", Some("sources")));
        assert_eq!(split_comment("main.rs"), ("main.rs", None));
        assert_eq!(split_comment("notes #"), ("notes", None));
        assert_eq!(split_comment("a # b # c"), ("a", Some("b # c")));
    }
}
