use clap::ValueEnum;
use derive_more::Display;

use crate::codec::{AsciiCodec, MarkdownCodec, ParseError, ValidationReport};
use crate::config::EditorConfig;
use crate::tree::{Node, ParsedNode};

/// A textual rendition of a forest that can be produced and read back.
pub trait TextFormat {
    fn generate<I>(&self, forest: &[Node<I>]) -> String;
    /// Parses the whole buffer, returning the first error in document order.
    fn parse(&self, text: &str) -> Result<Vec<ParsedNode>, ParseError>;
    /// Runs the same grammar without stopping and reports every distinct error.
    fn validate(&self, text: &str) -> ValidationReport;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, ValueEnum)]
pub enum Format {
    #[display("ascii")]
    Ascii,
    #[display("markdown")]
    Markdown,
}

impl Format {
    pub fn codec(self, config: &EditorConfig) -> Codec {
        match self {
            Format::Ascii => Codec::Ascii(AsciiCodec),
            Format::Markdown => Codec::Markdown(MarkdownCodec::new(config.auto_slash)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Codec {
    Ascii(AsciiCodec),
    Markdown(MarkdownCodec),
}

impl TextFormat for Codec {
    fn generate<I>(&self, forest: &[Node<I>]) -> String {
        match self {
            Codec::Ascii(codec) => codec.generate(forest),
            Codec::Markdown(codec) => codec.generate(forest),
        }
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedNode>, ParseError> {
        match self {
            Codec::Ascii(codec) => codec.parse(text),
            Codec::Markdown(codec) => codec.parse(text),
        }
    }

    fn validate(&self, text: &str) -> ValidationReport {
        match self {
            Codec::Ascii(codec) => codec.validate(text),
            Codec::Markdown(codec) => codec.validate(text),
        }
    }
}
