//! Error types for parsing CarFuel data.

/// Result alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors produced when converting loosely-typed input into CarFuel types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unrecognized fuel type string.
    #[error("Unknown fuel type: {0}")]
    UnknownFuelType(String),

    /// Timestamp text that is not valid RFC 3339.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
