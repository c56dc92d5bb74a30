/*!
Error types used in the library.

- Parse errors carry a position and surface to the caller; nothing recovers from them locally.
- Domain errors concern the shape of the problem rather than its text, e.g. a fact file with no facts leaves the universe unbounded.
- IO errors wrap the underlying kind.

Violations of internal invariants (a disjointness pass leaving an overlap, a diamond reached under liquid semantics) are not errors but bugs, and abort with a diagnostic.

Names of the error enums overlap with corresponding stages, so `err::{self}` is often used to prefix the types with `err::`.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An error while reading input text.
    Parse(ParseError),

    /// An error in the shape of the problem.
    Domain(DomainError),

    /// An error from the operating system.
    Io(std::io::ErrorKind),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Parse(e) => write!(f, "{e}"),
            ErrorKind::Domain(e) => write!(f, "{e}"),
            ErrorKind::Io(kind) => write!(f, "io error: {kind}"),
        }
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e.kind())
    }
}

/// An error while reading input text, located at a line and column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// The 1-based line of the offending text, when known.
    pub line: usize,

    /// The 1-based column of the offending text, when known.
    pub column: usize,

    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// The varieties of parse error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character no token begins with.
    UnexpectedCharacter(char),

    /// The input ended where more was required.
    UnexpectedEnd,

    /// A token other than the required one.
    Expected(&'static str, String),

    /// A name which is not an interval relation.
    UnknownRelation(String),

    /// A variable, where the grammar is restricted to ground formulas.
    Variable(String),

    /// A diamond operator inside a liquid block.
    DiamondInLiquid,

    /// A number too large to be a time point or weight.
    Number(String),
}

impl ParseError {
    pub fn new(line: usize, column: usize, kind: ParseErrorKind) -> Self {
        ParseError { line, column, kind }
    }

    /// An unknown-relation error with no position, for use outside the parsers.
    pub fn unknown_relation(name: &str) -> Self {
        ParseError::new(0, 0, ParseErrorKind::UnknownRelation(name.to_owned()))
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}")?,
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of input")?,
            ParseErrorKind::Expected(wanted, found) => {
                write!(f, "expected {wanted}, found {found}")?
            }
            ParseErrorKind::UnknownRelation(name) => {
                write!(f, "no interval relation matches {name:?}")?
            }
            ParseErrorKind::Variable(name) => {
                write!(f, "variable ?{name} in a ground formula")?
            }
            ParseErrorKind::DiamondInLiquid => {
                write!(f, "a diamond operator cannot appear inside a liquid block")?
            }
            ParseErrorKind::Number(text) => write!(f, "malformed number {text:?}")?,
        }
        if self.line > 0 {
            write!(f, " (line {}, column {})", self.line, self.column)?;
        }
        Ok(())
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// An error in the shape of the problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// The fact file holds no facts, so nothing bounds the universe.
    NoFacts,

    /// A fact uses a predicate with a different arity than its declared signature.
    ArityMismatch {
        predicate: String,
        declared: usize,
        used: usize,
    },

    /// A formula is quantified over intervals outside the universe.
    QuantificationOutsideUniverse {
        formula: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NoFacts => write!(
                f,
                "no facts given: at least one fact is needed to bound the interval to reason over"
            ),
            DomainError::ArityMismatch {
                predicate,
                declared,
                used,
            } => write!(
                f,
                "predicate {predicate} declared with {declared} arguments but used with {used}"
            ),
            DomainError::QuantificationOutsideUniverse { formula } => write!(
                f,
                "formula {formula} is quantified outside the universe of the facts"
            ),
        }
    }
}

impl From<DomainError> for ErrorKind {
    fn from(e: DomainError) -> Self {
        ErrorKind::Domain(e)
    }
}
