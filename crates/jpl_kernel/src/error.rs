//! Errors raised while reading or evaluating SPK kernels.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum KernelError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("invalid DAF/SPK file: {0}")]
    InvalidFormat(String),
    #[error("file truncated at byte {offset}")]
    Truncated { offset: usize },
    #[error("unsupported SPK data type {data_type} for target {target}")]
    UnsupportedType { target: i32, data_type: i32 },
    #[error("no segment for target {target} relative to center {center}")]
    SegmentNotFound { target: i32, center: i32 },
    #[error("epoch {epoch_tdb_s} s TDB outside coverage of {target} wrt {center}")]
    EpochOutOfRange {
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    },
}

impl From<std::io::Error> for KernelError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
