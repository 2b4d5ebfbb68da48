//! The provider seam consumed by the calendar layer.

use chrono::{DateTime, Utc};
use muhurta_frames::SphericalCoords;

use crate::{Body, Engine, EngineError, GeoLocation};

/// Apparent positions as the calendar computations need them.
///
/// [`Engine`] is the production implementation; anything that can answer
/// these three questions (a fitted model, a test double) can stand in.
pub trait Ephemeris {
    /// Apparent topocentric ecliptic coordinates (J2000 ecliptic) of `body`.
    fn apparent_ecliptic(
        &self,
        body: Body,
        at: &DateTime<Utc>,
        site: &GeoLocation,
    ) -> Result<SphericalCoords, EngineError>;

    /// Geometric altitude of the Sun's centre in degrees, unrefracted.
    fn sun_altitude_deg(&self, at: &DateTime<Utc>, site: &GeoLocation)
    -> Result<f64, EngineError>;

    /// Julian Date on the TT scale.
    fn tt_julian_date(&self, at: &DateTime<Utc>) -> f64;
}

impl Ephemeris for Engine {
    fn apparent_ecliptic(
        &self,
        body: Body,
        at: &DateTime<Utc>,
        site: &GeoLocation,
    ) -> Result<SphericalCoords, EngineError> {
        Ok(self.apparent_place(body, at, site)?.ecliptic())
    }

    fn sun_altitude_deg(
        &self,
        at: &DateTime<Utc>,
        site: &GeoLocation,
    ) -> Result<f64, EngineError> {
        Ok(self.apparent_place(Body::Sun, at, site)?.altitude_deg(site))
    }

    fn tt_julian_date(&self, at: &DateTime<Utc>) -> f64 {
        self.lsk().tt_julian_date(at)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn apparent_ecliptic(
        &self,
        body: Body,
        at: &DateTime<Utc>,
        site: &GeoLocation,
    ) -> Result<SphericalCoords, EngineError> {
        (**self).apparent_ecliptic(body, at, site)
    }

    fn sun_altitude_deg(
        &self,
        at: &DateTime<Utc>,
        site: &GeoLocation,
    ) -> Result<f64, EngineError> {
        (**self).sun_altitude_deg(at, site)
    }

    fn tt_julian_date(&self, at: &DateTime<Utc>) -> f64 {
        (**self).tt_julian_date(at)
    }
}
