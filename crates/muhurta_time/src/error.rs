//! Error types for time-scale conversions.

use thiserror::Error;

/// Errors from LSK parsing or instant conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// LSK text could not be parsed.
    #[error("LSK parse error: {0}")]
    LskParse(String),
    #[error("I/O error: {0}")]
    Io(String),
    /// A Julian date or timestamp has no representable calendar instant.
    #[error("instant out of range: {0}")]
    OutOfRange(String),
    /// A civil time does not exist or is ambiguous in the target zone.
    #[error("invalid local time: {0}")]
    InvalidLocalTime(String),
}

impl From<std::io::Error> for TimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
