//! Synthetic ephemerides for unit tests.

use std::f64::consts::TAU;

use chrono::{DateTime, Utc};
use muhurta_core::{Body, EngineError, Ephemeris, GeoLocation, SphericalCoords};
use muhurta_time::julian_date_utc;

/// Hour of the IST day in [0, 24).
pub(crate) fn ist_hour(at: &DateTime<Utc>) -> f64 {
    ((at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9 + 19_800.0)
        / 3600.0)
        .rem_euclid(24.0)
}

/// Sun peaking at 40° at 12:00 IST, crossing 0° at 06:00 and 18:00.
pub(crate) fn sine_day(hour: f64) -> f64 {
    40.0 * (TAU * (hour - 6.0) / 24.0).sin()
}

/// Analytic crossing hours of `sine_day` with `horizon_deg`.
pub(crate) fn sine_day_crossings(horizon_deg: f64) -> (f64, f64) {
    let x = (horizon_deg / 40.0).asin() * 24.0 / TAU;
    (6.0 + x, 18.0 - x)
}

/// Sun and Moon moving uniformly in longitude; solar altitude from a
/// function of the IST hour.
pub(crate) struct FakeSky {
    pub epoch: DateTime<Utc>,
    pub sun_lon_deg: f64,
    pub sun_rate_deg_per_day: f64,
    pub moon_lon_deg: f64,
    pub moon_rate_deg_per_day: f64,
    pub altitude: fn(f64) -> f64,
}

impl FakeSky {
    /// Fixed longitudes with the sine day.
    pub fn still(epoch: DateTime<Utc>, sun_lon_deg: f64, moon_lon_deg: f64) -> Self {
        Self {
            epoch,
            sun_lon_deg,
            sun_rate_deg_per_day: 0.0,
            moon_lon_deg,
            moon_rate_deg_per_day: 0.0,
            altitude: sine_day,
        }
    }

    pub fn with_altitude(altitude: fn(f64) -> f64) -> Self {
        Self {
            altitude,
            ..Self::still(DateTime::UNIX_EPOCH, 0.0, 0.0)
        }
    }

    fn days_since_epoch(&self, at: &DateTime<Utc>) -> f64 {
        (*at - self.epoch).num_milliseconds() as f64 / 86_400_000.0
    }
}

impl Ephemeris for FakeSky {
    fn apparent_ecliptic(
        &self,
        body: Body,
        at: &DateTime<Utc>,
        _site: &GeoLocation,
    ) -> Result<SphericalCoords, EngineError> {
        let days = self.days_since_epoch(at);
        let lon = match body {
            Body::Sun => self.sun_lon_deg + self.sun_rate_deg_per_day * days,
            Body::Moon => self.moon_lon_deg + self.moon_rate_deg_per_day * days,
            Body::Earth => return Err(EngineError::InvalidQuery("earth")),
        };
        Ok(SphericalCoords {
            lon_deg: lon.rem_euclid(360.0),
            lat_deg: 0.0,
            distance: 1.0,
        })
    }

    fn sun_altitude_deg(
        &self,
        at: &DateTime<Utc>,
        _site: &GeoLocation,
    ) -> Result<f64, EngineError> {
        Ok((self.altitude)(ist_hour(at)))
    }

    fn tt_julian_date(&self, at: &DateTime<Utc>) -> f64 {
        julian_date_utc(at)
    }
}
