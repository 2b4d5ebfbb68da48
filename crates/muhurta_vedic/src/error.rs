//! Error types for calendar calculations.

use muhurta_core::EngineError;
use muhurta_time::TimeError;
use thiserror::Error;

/// Errors from the calendar and schedule layer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Error from the ephemeris engine.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    /// Error from time conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Iterative search did not converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
    /// A graha, location or similar name was not recognised.
    #[error("unknown name: {0:?}")]
    UnknownName(String),
}
