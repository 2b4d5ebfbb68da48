use thiserror::Error;

/// Why one feed source produced no headlines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FeedError {
    /// Connection, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP status {0}")]
    Status(u16),
    /// Body is not RSS, or an item lacks title or link.
    #[error("parse error: {0}")]
    Parse(String),
}
