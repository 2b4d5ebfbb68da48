//! Linear ayanamsha and sidereal longitude.

use chrono::{DateTime, Utc};
use muhurta_core::{Body, Ephemeris, GeoLocation};
use muhurta_time::J2000_JD;

use crate::error::VedicError;

/// Ayanamsha at J2000.0 in degrees.
pub const AYANAMSHA_J2000_DEG: f64 = 23.855;
/// Precession rate, arcseconds per Julian year.
pub const PRECESSION_ARCSEC_PER_YEAR: f64 = 50.29;

/// Linear ayanamsha for `days` TT days since J2000.0.
pub fn ayanamsha_deg(days: f64) -> f64 {
    AYANAMSHA_J2000_DEG + (PRECESSION_ARCSEC_PER_YEAR * (days / 365.25)) / 3600.0
}

/// Reduce to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Sidereal ecliptic longitude of `body` as seen from `site`, in [0, 360).
pub fn sidereal_longitude<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    at: &DateTime<Utc>,
    site: &GeoLocation,
) -> Result<f64, VedicError> {
    let tropical = eph.apparent_ecliptic(body, at, site)?.lon_deg;
    let days = eph.tt_julian_date(at) - J2000_JD;
    Ok(normalize_360(tropical - ayanamsha_deg(days)))
}
