use derive_more::Display;
use hashlink::LinkedHashMap;
use snafu::Snafu;

/// Every way a line of either text format can be rejected.
///
/// The two formats use different subsets: the ASCII grammar never reports
/// dash problems and the list grammar never reports branch glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum ParseErrorKind {
    #[display("missingDash")]
    MissingDash,
    #[display("missingSpace")]
    MissingSpace,
    #[display("missingContent")]
    MissingContent,
    #[display("invalidFormat")]
    InvalidFormat,
    #[display("invalidIndentation")]
    InvalidIndentation,
    #[display("emptyNodeName")]
    EmptyNodeName,
    #[display("invalidFileNode")]
    InvalidFileNode,
    #[display("duplicateNodeName")]
    DuplicateNodeName,
    #[display("emptyLine")]
    EmptyLine,
    #[display("invalidBranchSymbol")]
    InvalidBranchSymbol,
    #[display("orphanNode")]
    OrphanNode,
}

/// 1-based line and column, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("Ln {line}, Col {column}")]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Snafu)]
#[snafu(display("{} at [{}]: {:?}", kind, location, token))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
    pub token: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, column: usize, token: impl Into<String>) -> Self {
        Self {
            kind,
            location: Location { line, column },
            token: token.into(),
        }
    }
}

/// Outcome of a non-stopping validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ParseError>,
}

impl ValidationReport {
    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ParseErrorKind> + '_ {
        self.errors.iter().map(|error| error.kind)
    }
}

/// Where parser errors go.
///
/// In fail-fast mode the first report aborts the parse. In collecting mode
/// every distinct `(kind, location)` is kept in first-seen order and the parse
/// carries on with the next line.
#[derive(Debug)]
pub(crate) struct Diagnostics {
    fail_fast: bool,
    errors: LinkedHashMap<(ParseErrorKind, Location), ParseError>,
}

impl Diagnostics {
    pub(crate) fn fail_fast() -> Self {
        Self {
            fail_fast: true,
            errors: LinkedHashMap::new(),
        }
    }

    pub(crate) fn collecting() -> Self {
        Self {
            fail_fast: false,
            errors: LinkedHashMap::new(),
        }
    }

    pub(crate) fn report(&mut self, error: ParseError) -> Result<(), ParseError> {
        if self.fail_fast {
            return Err(error);
        }
        let key = (error.kind, error.location);
        if !self.errors.contains_key(&key) {
            self.errors.insert(key, error);
        }
        Ok(())
    }

    pub(crate) fn into_report(self) -> ValidationReport {
        let errors: Vec<_> = self.errors.into_iter().map(|(_, error)| error).collect();
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}
