//! Error types for version and range parsing.

use thiserror::Error;

/// Errors raised when a version, constraint, or range string does not
/// match the required grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input string was empty.
    #[error("version string is empty")]
    Empty,

    /// A dotted list contained a token that is not a non-negative integer.
    #[error("invalid dotted list: {0}")]
    InvalidDottedList(String),

    /// The leading token of a version string was not a dotted list.
    #[error("version must start with a dotted list: {0}")]
    MustStartWithDottedList(String),

    /// A version part carried an unrecognized modifier keyword or a
    /// malformed dotted list.
    #[error("invalid version part: {0}")]
    InvalidVersionPart(String),

    /// The end of a range interval was not marked exclusive.
    #[error("range end must be marked exclusive with '!': {0}")]
    RangeEndNotExclusive(String),
}

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, FormatError>;
