// Error handling for uritemplate

use std::fmt;

/// Error raised while parsing a template string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `}` appeared in the literal text before the first `{`
    UnexpectedClosingBrace,
    /// An expression was not closed by exactly one `}`
    MalformedExpression,
    InvalidName(String),
    MultipleColons(String),
    /// The prefix length after `:` was not a non-negative decimal number
    InvalidPrefix(String),
    ExplodeWithPrefix(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedClosingBrace => write!(f, "unexpected }}"),
            ParseError::MalformedExpression => write!(f, "malformed template"),
            ParseError::InvalidName(name) => write!(f, "not a valid name: {}", name),
            ParseError::MultipleColons(term) => {
                write!(f, "multiple colons in same term: {}", term)
            }
            ParseError::InvalidPrefix(term) => write!(f, "invalid prefix length in term: {}", term),
            ParseError::ExplodeWithPrefix(term) => {
                write!(f, "both explode and prefix modifiers on same term: {}", term)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Error raised while expanding a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// A prefix modifier was applied to an associative value
    TruncatedMap(String),
    /// A value could not be lifted into scalar, list or map form
    UnsupportedValue { name: String, reason: String },
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::TruncatedMap(name) => {
                write!(f, "cannot truncate a map expansion: {}", name)
            }
            ExpandError::UnsupportedValue { name, reason } => {
                write!(f, "unsupported value for '{}': {}", name, reason)
            }
        }
    }
}

impl std::error::Error for ExpandError {}

/// Either half of the parse-then-expand pipeline failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Parse(ParseError),
    Expand(ExpandError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "Template parse error: {}", err),
            Error::Expand(err) => write!(f, "Template expansion error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Expand(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<ExpandError> for Error {
    fn from(err: ExpandError) -> Self {
        Error::Expand(err)
    }
}
