//! Indented Markdown lists, the live editing surface.
//!
//! ```text
//! - project/  # workspace
//!   - src/
//!     - main.rs
//!   - Cargo.toml
//! ```
//!
//! Each line is `indent + "- " + name`, two spaces per level. Only a trailing
//! `/` makes a folder, and a file may not be followed by a deeper line. The
//! optional auto-slash pass fixes the latter before parsing.

mod auto_slash;
mod generator;
mod line;
mod parser;

use std::borrow::Cow;

use crate::codec::{Diagnostics, ParseError, TextFormat, ValidationReport};
use crate::tree::{Node, ParsedNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownCodec {
    auto_slash: bool,
}

impl Default for MarkdownCodec {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MarkdownCodec {
    pub fn new(auto_slash: bool) -> Self {
        Self { auto_slash }
    }

    pub fn auto_slash(&self) -> bool {
        self.auto_slash
    }

    /// The text the strict grammar will actually see.
    pub fn prepare<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.auto_slash {
            auto_slash::apply_auto_slash(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Parses without the auto-slash rewrite.
    pub fn parse_strict(&self, text: &str) -> Result<Vec<ParsedNode>, ParseError> {
        parser::parse(text, &mut Diagnostics::fail_fast())
    }
}

impl TextFormat for MarkdownCodec {
    fn generate<I>(&self, forest: &[Node<I>]) -> String {
        generator::generate(forest)
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedNode>, ParseError> {
        self.parse_strict(&self.prepare(text))
    }

    fn validate(&self, text: &str) -> ValidationReport {
        let mut diagnostics = Diagnostics::collecting();
        let _ = parser::parse(&self.prepare(text), &mut diagnostics);
        diagnostics.into_report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Location, ParseErrorKind};
    use rstest::rstest;

    const STRICT: MarkdownCodec = MarkdownCodec { auto_slash: false };

    #[test]
    fn parses_a_nested_list() {
        let forest = STRICT
            .parse("- Root/\n  - Child1/\n  - Child2/\n    - Grandchild/")
            .unwrap();
        assert_eq!(forest.len(), 1);
        let children = forest[0].children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].children().unwrap()[0].path, "Root/Child2/Grandchild/");
    }

    #[test]
    fn empty_text_is_an_empty_forest() {
        assert_eq!(STRICT.parse("").unwrap(), Vec::new());
        assert!(STRICT.validate("\n  \n").valid);
    }

    #[rstest]
    #[case("- Root/\n      - file.txt\n            - Invalid", ParseErrorKind::InvalidFileNode, 2)]
    #[case("- Root/\n  - Child/\n  - Child/", ParseErrorKind::DuplicateNodeName, 3)]
    #[case("- Root/\n  Invalid/", ParseErrorKind::MissingDash, 2)]
    #[case("- Root/\n  -Child", ParseErrorKind::MissingSpace, 2)]
    #[case("- Root/\n  - ", ParseErrorKind::MissingContent, 2)]
    fn invalid_lists_are_rejected(#[case] text: &str, #[case] kind: ParseErrorKind, #[case] line: usize) {
        let error = STRICT.parse(text).unwrap_err();
        assert_eq!(error.kind, kind);
        assert_eq!(error.location.line, line);
    }

    #[test]
    fn odd_indentation_points_at_the_indent() {
        let error = STRICT.parse("- Root/\n   - Invalid/").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(error.location, Location { line: 2, column: 3 });
    }

    #[test]
    fn auto_slash_promotes_parents_before_parsing() {
        let codec = MarkdownCodec::new(true);
        let prepared = codec.prepare("Root\n  - Folder\n    - file.txt");
        assert!(prepared.contains("  - Folder/"));

        let report = codec.validate("Root\n  - Folder\n    - file.txt");
        assert!(!report.kinds().any(|kind| kind == ParseErrorKind::InvalidFileNode));

        let forest = codec.parse("- Root\n  - Folder\n    - file.txt").unwrap();
        let folder = &forest[0].children().unwrap()[0];
        assert_eq!(folder.name, "Folder/");
        assert_eq!(folder.children().unwrap()[0].path, "Root/Folder/file.txt");
    }

    #[test]
    fn without_auto_slash_parents_must_be_folders() {
        let error = STRICT.parse("- Root\n  - file.txt").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::InvalidFileNode);
        assert_eq!(error.location.line, 1);
    }

    #[test]
    fn generated_list_round_trips() {
        let text = "- project/  # workspace\n  - src/\n    - main.rs\n  - Cargo.toml\n- notes/\n";
        let forest = STRICT.parse(text).unwrap();
        assert_eq!(STRICT.generate(&forest), text);
        assert_eq!(STRICT.parse(&STRICT.generate(&forest)).unwrap(), forest);
    }

    #[test]
    fn validation_reports_every_error() {
        let report = STRICT.validate("- a/\n  b\n  - c\n    - d\n  - c\n");
        assert_eq!(
            report.kinds().collect::<Vec<_>>(),
            [
                ParseErrorKind::MissingDash,
                ParseErrorKind::InvalidFileNode,
                ParseErrorKind::DuplicateNodeName,
            ]
        );
    }
}
