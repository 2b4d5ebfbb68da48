//! Time scales for the ephemeris pipeline.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - LSK (leapseconds kernel) parsing, with a built-in table
//! - UTC → TAI → TT → TDB conversion and its inverse
//! - Mean sidereal time
//! - `chrono` instant helpers and the IST zone

pub mod error;
pub mod instant;
pub mod julian;
pub mod lsk;
pub mod scales;
pub mod sidereal;

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

pub use error::TimeError;
pub use instant::{
    IST, civil_instant, from_utc_seconds_past_j2000, julian_date_utc, local_midnight, to_ist,
    today_ist, utc_seconds_past_j2000,
};
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, j2000_seconds_to_jd, jd_to_j2000_seconds,
};
pub use lsk::{BUILTIN_LSK, LskData};
pub use sidereal::{earth_rotation_angle, gmst, local_sidereal_time};

/// A parsed leap-second kernel, ready for time conversions.
#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondKernel {
    data: LskData,
}

impl LeapSecondKernel {
    /// Load an LSK text kernel from disk.
    pub fn load(path: &Path) -> Result<Self, TimeError> {
        let content = std::fs::read_to_string(path)?;
        let kernel = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            leap_seconds = kernel.data.leap_seconds.len(),
            "loaded leapseconds kernel"
        );
        Ok(kernel)
    }

    pub fn parse(content: &str) -> Result<Self, TimeError> {
        Ok(Self {
            data: lsk::parse_lsk(content)?,
        })
    }

    /// The compiled-in leap second table (valid from 2017 onwards until the next leap second).
    pub fn builtin() -> Result<Self, TimeError> {
        Self::parse(BUILTIN_LSK)
    }

    pub fn data(&self) -> &LskData {
        &self.data
    }

    /// UTC seconds past J2000 → TDB seconds past J2000.
    pub fn utc_to_tdb(&self, utc_s: f64) -> f64 {
        scales::utc_to_tdb(utc_s, &self.data)
    }

    /// TDB seconds past J2000 → UTC seconds past J2000.
    pub fn tdb_to_utc(&self, tdb_s: f64) -> f64 {
        scales::tdb_to_utc(tdb_s, &self.data)
    }

    /// UTC seconds past J2000 → TT seconds past J2000.
    pub fn utc_to_tt(&self, utc_s: f64) -> f64 {
        scales::utc_to_tt(utc_s, &self.data)
    }

    /// TDB seconds past J2000 for a civil instant.
    pub fn tdb_seconds(&self, at: &DateTime<Utc>) -> f64 {
        self.utc_to_tdb(utc_seconds_past_j2000(at))
    }

    /// Julian Date in TT for a civil instant.
    pub fn tt_julian_date(&self, at: &DateTime<Utc>) -> f64 {
        j2000_seconds_to_jd(self.utc_to_tt(utc_seconds_past_j2000(at)))
    }
}
