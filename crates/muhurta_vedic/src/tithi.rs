//! Tithi (lunar day) from the Moon-Sun sidereal elongation.
//!
//! A tithi is each 12° of elongation; 30 tithis make a synodic month,
//! split into the waxing (Shukla) and waning (Krishna) fortnights.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, TimeDelta, Utc};
use muhurta_core::{Body, Ephemeris, GeoLocation};
use serde::Serialize;

use crate::ayanamsha::{normalize_360, sidereal_longitude};
use crate::error::VedicError;
use crate::search_util::{bisect_instant, is_genuine_crossing, normalize_to_pm180};

/// Degrees of elongation per tithi.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Forward scan for the end of a tithi: 2 h steps over three days.
const END_SCAN_STEP_HOURS: i64 = 2;
const END_SCAN_STEPS: usize = 36;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// Tithi at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TithiInfo {
    /// 1 to 30.
    pub index: u8,
    pub paksha: Paksha,
    /// 1 to 15 within the paksha.
    pub tithi_in_paksha: u8,
    /// Moon minus Sun sidereal longitude, [0, 360).
    pub elongation_deg: f64,
}

impl TithiInfo {
    /// "Purnima", "Amavasya" or "Tithi N".
    pub fn name(&self) -> String {
        match self.index {
            15 => "Purnima".to_string(),
            30 => "Amavasya".to_string(),
            _ => format!("Tithi {}", self.tithi_in_paksha),
        }
    }
}

impl Display for TithiInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.paksha.name())
    }
}

/// Classify an elongation in degrees.
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiInfo {
    let elongation_deg = normalize_360(elongation_deg);
    let index = ((elongation_deg / TITHI_SEGMENT_DEG).floor() as i64 + 1).clamp(1, 30) as u8;
    let (paksha, tithi_in_paksha) = if index <= 15 {
        (Paksha::Shukla, index)
    } else {
        (Paksha::Krishna, index - 15)
    };
    TithiInfo {
        index,
        paksha,
        tithi_in_paksha,
        elongation_deg,
    }
}

/// Moon minus Sun sidereal longitude.
pub fn elongation_at<E: Ephemeris + ?Sized>(
    eph: &E,
    at: &DateTime<Utc>,
    site: &GeoLocation,
) -> Result<f64, VedicError> {
    let moon = sidereal_longitude(eph, Body::Moon, at, site)?;
    let sun = sidereal_longitude(eph, Body::Sun, at, site)?;
    Ok(normalize_360(moon - sun))
}

/// Tithi in force at `at` for an observer at `site`.
pub fn tithi_at<E: Ephemeris + ?Sized>(
    eph: &E,
    at: &DateTime<Utc>,
    site: &GeoLocation,
) -> Result<TithiInfo, VedicError> {
    Ok(tithi_from_elongation(elongation_at(eph, at, site)?))
}

/// Instant at which the tithi in force at `at` ends.
pub fn tithi_end<E: Ephemeris + ?Sized>(
    eph: &E,
    at: &DateTime<Utc>,
    site: &GeoLocation,
    tolerance: TimeDelta,
) -> Result<DateTime<Utc>, VedicError> {
    let current = tithi_at(eph, at, site)?;
    let target = f64::from(current.index) * TITHI_SEGMENT_DEG;
    let f = |t: &DateTime<Utc>| -> Result<f64, VedicError> {
        Ok(normalize_to_pm180(elongation_at(eph, t, site)? - target))
    };

    let step = TimeDelta::hours(END_SCAN_STEP_HOURS);
    let mut t_prev = *at;
    let mut f_prev = f(&t_prev)?;
    for _ in 0..END_SCAN_STEPS {
        let t_next = t_prev + step;
        let f_next = f(&t_next)?;
        if f_prev < 0.0 && f_next >= 0.0 && is_genuine_crossing(f_prev, f_next) {
            return bisect_instant(t_prev, f_prev, t_next, tolerance, &f);
        }
        t_prev = t_next;
        f_prev = f_next;
    }
    Err(VedicError::NoConvergence("tithi end not found within three days"))
}
