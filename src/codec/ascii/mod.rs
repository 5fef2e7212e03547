//! Box-drawing diagrams.
//!
//! ```text
//! project/
//! ├── src/  # sources
//! │   └── main.rs
//! └── Cargo.toml
//! ```
//!
//! Roots are written without a prefix. Every other line carries one indent
//! block per ancestor below the root (`│   ` while that ancestor has later
//! siblings, four spaces otherwise) and a branch glyph, `├── ` or `└── ` for
//! the last sibling. A node with children is a folder even if its name lacks
//! the trailing `/`.

mod generator;
mod parser;
mod tokenizer;

pub use tokenizer::{tokenize, tokenize_line, Token, TokenKind, TokenLine};

use crate::codec::{Diagnostics, ParseError, TextFormat, ValidationReport};
use crate::tree::{Node, ParsedNode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsciiCodec;

impl TextFormat for AsciiCodec {
    fn generate<I>(&self, forest: &[Node<I>]) -> String {
        generator::generate(forest)
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedNode>, ParseError> {
        parser::parse(text, &mut Diagnostics::fail_fast())
    }

    fn validate(&self, text: &str) -> ValidationReport {
        let mut diagnostics = Diagnostics::collecting();
        // Collecting diagnostics never abort, the forest itself is not needed.
        let _ = parser::parse(text, &mut diagnostics);
        diagnostics.into_report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Location, ParseErrorKind};
    use rstest::rstest;

    const SAMPLE: &str = "Root\n├── Child1\n│   └── Grandchild1\n└── Child2";

    fn names(nodes: &[ParsedNode]) -> Vec<&str> {
        nodes.iter().map(|node| node.name.as_str()).collect()
    }

    #[test]
    fn parses_a_simple_diagram() {
        let forest = AsciiCodec.parse(SAMPLE).unwrap();
        assert_eq!(names(&forest), ["Root/"]);

        let children = forest[0].children().unwrap();
        assert_eq!(names(children), ["Child1/", "Child2"]);
        assert_eq!(names(children[0].children().unwrap()), ["Grandchild1"]);
    }

    #[test]
    fn single_line_is_a_lone_file() {
        let forest = AsciiCodec.parse("SingleNode").unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "SingleNode");
        assert!(forest[0].kind.is_file());
    }

    #[test]
    fn folders_are_normalized_and_files_left_alone() {
        let forest = AsciiCodec
            .parse("Root\n├── Folder\n│   └── file1.txt\n└── file2.txt")
            .unwrap();

        let root = &forest[0];
        assert_eq!(root.name, "Root/");
        assert!(root.is_folder());

        let children = root.children().unwrap();
        assert_eq!(children[0].name, "Folder/");
        assert_eq!(children[0].path, "Root/Folder/");
        assert_eq!(children[0].children().unwrap()[0].name, "file1.txt");
        assert_eq!(children[0].children().unwrap()[0].path, "Root/Folder/file1.txt");
        assert_eq!(children[1].name, "file2.txt");
        assert!(children[1].kind.is_file());
    }

    #[test]
    fn trailing_slash_marks_an_empty_folder() {
        let forest = AsciiCodec.parse("root/\n└── empty/").unwrap();
        let empty = &forest[0].children().unwrap()[0];
        assert!(empty.is_folder());
        assert_eq!(empty.children().map(<[_]>::len), Some(0));
    }

    #[test]
    fn comments_survive_a_round_trip() {
        let text = "project/  # workspace\n├── src/  # code\n│   └── main.rs\n└── Cargo.toml  # manifest\n";
        let forest = AsciiCodec.parse(text).unwrap();
        assert_eq!(forest[0].comment(), Some("workspace"));
        assert_eq!(AsciiCodec.generate(&forest), text);
    }

    #[test]
    fn generated_text_parses_back_to_the_same_forest() {
        let forest = AsciiCodec
            .parse("a/\n├── b/\n│   ├── c\n│   └── d/\n│       └── e\n└── f\nz/\n└── y/\n")
            .unwrap();
        let reparsed = AsciiCodec.parse(&AsciiCodec.generate(&forest)).unwrap();
        assert_eq!(reparsed, forest);
    }

    #[test]
    fn duplicate_siblings_are_reported_at_the_later_line() {
        let report = AsciiCodec.validate("root/\n├── file1\n├── file1");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ParseErrorKind::DuplicateNodeName);
        assert_eq!(report.errors[0].location.line, 3);

        let error = AsciiCodec.parse("root/\n├── file1\n├── file1").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::DuplicateNodeName);
        assert_eq!(error.location.line, 3);
    }

    #[test]
    fn leading_branch_line_is_an_orphan() {
        let error = AsciiCodec.parse("├── x").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::OrphanNode);
        assert_eq!(error.location, Location { line: 1, column: 1 });
    }

    #[rstest]
    #[case("", ParseErrorKind::EmptyLine)]
    #[case("   \n\n", ParseErrorKind::EmptyLine)]
    #[case("├── Invalid Root", ParseErrorKind::OrphanNode)]
    #[case("Root\n├─── Invalid\n└── Valid", ParseErrorKind::InvalidBranchSymbol)]
    #[case("Root\n├─ Invalid", ParseErrorKind::InvalidBranchSymbol)]
    #[case("Root\n│   stray", ParseErrorKind::InvalidFormat)]
    #[case("Root\n└── # only a comment", ParseErrorKind::EmptyNodeName)]
    fn invalid_diagrams_are_rejected(#[case] text: &str, #[case] expected: ParseErrorKind) {
        let report = AsciiCodec.validate(text);
        assert!(!report.valid);
        assert_eq!(report.first_error().map(|error| error.kind), Some(expected));
        assert_eq!(AsciiCodec.parse(text).map_err(|error| error.kind), Err(expected));
    }

    #[rstest]
    #[case(SAMPLE)]
    #[case("SingleNode")]
    #[case("Root\n├── Level1A\n│   ├── Level2A\n│   └── Level2B\n└── Level1B\n    └── Level2C")]
    fn valid_diagrams_pass_validation(#[case] text: &str) {
        let report = AsciiCodec.validate(text);
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn validation_collects_every_distinct_error() {
        let report = AsciiCodec.validate("root/\n├── a\n├── a\n├─── b\n│   stray\n");
        assert_eq!(
            report.kinds().collect::<Vec<_>>(),
            [
                ParseErrorKind::DuplicateNodeName,
                ParseErrorKind::InvalidBranchSymbol,
                ParseErrorKind::InvalidFormat,
            ]
        );
    }
}
