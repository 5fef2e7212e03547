use crate::codec::{split_comment, ParseError, ParseErrorKind};

pub(super) const PIPE_INDENT: &str = "│   ";
pub(super) const SPACE_INDENT: &str = "    ";
pub(super) const BRANCH_MIDDLE: &str = "├── ";
pub(super) const BRANCH_END: &str = "└── ";

const BRANCH_STARTS: [char; 2] = ['├', '└'];
const INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A root name, written without any prefix.
    Root,
    /// `├── `
    BranchMiddle,
    /// `└── `
    BranchEnd,
    /// `│   ` or four spaces.
    Indent,
    Name,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

/// The tokens of one non-blank line, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLine {
    pub line: usize,
    pub tokens: Vec<Token>,
}

impl TokenLine {
    /// Number of indent blocks before the glyph or root name.
    pub fn depth(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Indent)
            .count()
    }

    pub fn branch(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| matches!(token.kind, TokenKind::BranchMiddle | TokenKind::BranchEnd))
    }

    /// The root or node name. Every line produced by the tokenizer has one.
    pub fn name(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| matches!(token.kind, TokenKind::Root | TokenKind::Name))
    }

    pub fn comment(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| token.kind == TokenKind::Comment)
    }

    /// Node level: the indent depth, plus one below a branch glyph.
    pub fn level(&self) -> usize {
        self.depth() + usize::from(self.branch().is_some())
    }
}

/// Tokenizes every line, collecting errors instead of stopping.
pub fn tokenize(text: &str) -> (Vec<TokenLine>, Vec<ParseError>) {
    let mut lines = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in text.split('\n').enumerate() {
        match tokenize_line(raw, index + 1) {
            Ok(Some(tokens)) => lines.push(tokens),
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }

    (lines, errors)
}

/// Tokenizes a single physical line.
///
/// Returns `Ok(None)` for lines that carry no node: blank lines and spacer
/// lines made of vertical bars only.
pub fn tokenize_line(raw: &str, line: usize) -> Result<Option<TokenLine>, ParseError> {
    let raw = raw.trim_end_matches('\r');
    if is_spacer(raw) {
        return Ok(None);
    }

    let mut tokens = Vec::new();
    let mut rest = raw;
    let mut column = 1;

    while let Some((block, remainder)) = strip_indent(rest) {
        tokens.push(Token {
            kind: TokenKind::Indent,
            value: block.to_string(),
            line,
            column,
        });
        column += INDENT_WIDTH;
        rest = remainder;
    }
    let depth = tokens.len();

    if let Some((kind, glyph, content)) = strip_branch(rest) {
        tokens.push(Token {
            kind,
            value: glyph.to_string(),
            line,
            column,
        });
        push_content(&mut tokens, content, line, column + INDENT_WIDTH, TokenKind::Name)?;
    } else if rest.starts_with(BRANCH_STARTS) {
        return Err(ParseError::new(
            ParseErrorKind::InvalidBranchSymbol,
            line,
            column,
            rest,
        ));
    } else if depth == 0 {
        push_content(&mut tokens, rest, line, column, TokenKind::Root)?;
    } else {
        return Err(ParseError::new(
            ParseErrorKind::InvalidFormat,
            line,
            column,
            raw,
        ));
    }

    Ok(Some(TokenLine { line, tokens }))
}

fn is_spacer(raw: &str) -> bool {
    raw.chars().all(|c| c == '│' || c.is_whitespace())
}

fn strip_indent(rest: &str) -> Option<(&str, &str)> {
    [PIPE_INDENT, SPACE_INDENT].into_iter().find_map(|block| {
        rest.strip_prefix(block)
            .map(|remainder| (&rest[..block.len()], remainder))
    })
}

fn strip_branch(rest: &str) -> Option<(TokenKind, &'static str, &str)> {
    if let Some(content) = rest.strip_prefix(BRANCH_MIDDLE) {
        Some((TokenKind::BranchMiddle, BRANCH_MIDDLE, content))
    } else {
        rest.strip_prefix(BRANCH_END)
            .map(|content| (TokenKind::BranchEnd, BRANCH_END, content))
    }
}

fn push_content(
    tokens: &mut Vec<Token>,
    content: &str,
    line: usize,
    column: usize,
    kind: TokenKind,
) -> Result<(), ParseError> {
    let leading = content.chars().take_while(|c| c.is_whitespace()).count();
    let column = column + leading;
    let (name, comment) = split_comment(content);

    if name.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyNodeName,
            line,
            column,
            content.trim(),
        ));
    }

    tokens.push(Token {
        kind,
        value: name.to_string(),
        line,
        column,
    });

    if let Some(comment) = comment {
        let before_hash = content
            .trim_start()
            .split('#')
            .next()
            .map_or(0, |prefix| prefix.chars().count());
        tokens.push(Token {
            kind: TokenKind::Comment,
            value: comment.to_string(),
            line,
            column: column + before_hash + 1,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &TokenLine) -> Vec<TokenKind> {
        line.tokens.iter().map(|token| token.kind).collect()
    }

    #[test]
    fn root_line_is_a_single_root_token() {
        let line = tokenize_line("project/", 1).unwrap().unwrap();
        assert_eq!(kinds(&line), [TokenKind::Root]);
        assert_eq!(line.name().unwrap().value, "project/");
        assert_eq!(line.level(), 0);
    }

    #[test]
    fn nested_line_counts_indent_blocks() {
        let line = tokenize_line("│       └── deep.txt  # note", 4).unwrap().unwrap();
        assert_eq!(
            kinds(&line),
            [
                TokenKind::Indent,
                TokenKind::Indent,
                TokenKind::BranchEnd,
                TokenKind::Name,
                TokenKind::Comment
            ]
        );
        assert_eq!(line.depth(), 2);
        assert_eq!(line.level(), 3);
        assert_eq!(line.name().unwrap().value, "deep.txt");
        assert_eq!(line.name().unwrap().column, 13);
        assert_eq!(line.comment().map(|c| c.value.as_str()), Some("note"));
    }

    #[test]
    fn blank_and_spacer_lines_are_skipped() {
        assert_eq!(tokenize_line("", 1), Ok(None));
        assert_eq!(tokenize_line("   ", 1), Ok(None));
        assert_eq!(tokenize_line("│", 1), Ok(None));
        assert_eq!(tokenize_line("│   │", 1), Ok(None));
    }

    #[test]
    fn wrong_dash_count_is_an_invalid_branch_symbol() {
        let error = tokenize_line("├─── Invalid", 2).unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::InvalidBranchSymbol);
        assert_eq!(error.location.line, 2);
        assert_eq!(error.location.column, 1);

        let error = tokenize_line("│   └─ short", 3).unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::InvalidBranchSymbol);
        assert_eq!(error.location.column, 5);
    }

    #[test]
    fn indented_content_without_glyph_is_invalid_format() {
        let error = tokenize_line("│   orphan text", 5).unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::InvalidFormat);
        assert_eq!(error.location.column, 5);
    }

    #[test]
    fn glyph_without_name_is_an_empty_node_name() {
        let error = tokenize_line("├──   # just a comment", 2).unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::EmptyNodeName);
    }

    #[test]
    fn tokenize_collects_errors_per_line() {
        let (lines, errors) = tokenize("root\n├─ bad\n└── ok\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location.line, 2);
    }

    #[test]
    fn carriage_returns_are_ignored() {
        let line = tokenize_line("└── file.txt\r", 2).unwrap().unwrap();
        assert_eq!(line.name().unwrap().value, "file.txt");
    }
}
