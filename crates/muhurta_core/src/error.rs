//! Core engine errors.

use jpl_kernel::KernelError;
use muhurta_time::TimeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Ephemeris or leapseconds data could not be loaded.
    #[error("ephemeris data unavailable: {0}")]
    DataUnavailable(String),
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
    #[error("ephemeris evaluation failed: {0}")]
    Ephemeris(#[from] KernelError),
    #[error("time conversion failed: {0}")]
    Time(#[from] TimeError),
}
