//! Reader for NAIF SPK ephemeris kernels.
//!
//! Loads a DAF/SPK file into memory, indexes its segments, and evaluates
//! Type 2 Chebyshev segments. JPL planetary ephemerides such as `de421.bsp`
//! use Type 2 throughout.
//!
//! Reference: NAIF DAF and SPK Required Reading (public domain).

pub mod chebyshev;
pub mod daf;
pub mod error;
pub mod spk;

pub use error::KernelError;
pub use spk::{
    MAX_CHAIN_HOPS, SpkEvaluation, SpkKernel, SpkSegment, planet_body_to_barycenter,
    resolve_chain,
};
