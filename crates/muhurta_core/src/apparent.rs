//! Apparent topocentric place of Sun and Moon.
//!
//! Pipeline: observer = Earth (SSB) + geocentric site vector; target is
//! evaluated at the retarded epoch (three light-time iterations); the
//! direction is then shifted by first-order aberration from the observer's
//! barycentric velocity. Gravitational deflection is ignored (< 0.01″ for
//! these bodies away from the solar limb).

use chrono::{DateTime, Utc};
use muhurta_frames::{
    SphericalCoords, Vec3, add, cartesian_to_spherical, dot, icrf_to_ecliptic, norm,
    precession_matrix, rotate, scale, sub, unit,
};
use muhurta_time::{julian::julian_centuries, julian_date_utc, local_sidereal_time};

use crate::{Body, ComputationContext, Engine, EngineError, GeoLocation};

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

const LIGHT_TIME_ITERATIONS: usize = 3;

/// Apparent direction of a body as seen from a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPlace {
    /// Unit vector on ICRF axes.
    pub direction: Vec3,
    /// Geometric distance at the retarded epoch, km.
    pub distance_km: f64,
    pub light_time_s: f64,
    pub jd_tt: f64,
    /// UT1 Julian date (UT1 = UTC).
    pub jd_ut1: f64,
}

impl ApparentPlace {
    /// Longitude/latitude on the ecliptic of J2000.
    pub fn ecliptic(&self) -> SphericalCoords {
        let mut coords = cartesian_to_spherical(&icrf_to_ecliptic(&self.direction));
        coords.distance = self.distance_km;
        coords
    }

    /// Right ascension and declination (degrees) on the mean equator of date.
    pub fn equatorial_of_date(&self) -> (f64, f64) {
        let p = precession_matrix(julian_centuries(self.jd_tt));
        let eq = cartesian_to_spherical(&rotate(&p, &self.direction));
        (eq.lon_deg, eq.lat_deg)
    }

    /// Altitude above the site's astronomical horizon in degrees, without refraction.
    pub fn altitude_deg(&self, site: &GeoLocation) -> f64 {
        let (ra_deg, dec_deg) = self.equatorial_of_date();
        let lst = local_sidereal_time(self.jd_ut1, site.longitude_rad());
        let hour_angle = lst - ra_deg.to_radians();
        let (sin_lat, cos_lat) = site.latitude_rad().sin_cos();
        let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
        let sin_alt = sin_lat * sin_dec + cos_lat * cos_dec * hour_angle.cos();
        sin_alt.clamp(-1.0, 1.0).asin().to_degrees()
    }
}

impl Engine {
    /// Apparent place of `body` for an observer at `site` at instant `at`.
    pub fn apparent_place(
        &self,
        body: Body,
        at: &DateTime<Utc>,
        site: &GeoLocation,
    ) -> Result<ApparentPlace, EngineError> {
        if body == Body::Earth {
            return Err(EngineError::InvalidQuery("cannot observe Earth from its surface"));
        }
        if !site.is_valid() {
            return Err(EngineError::InvalidQuery("site coordinates out of range"));
        }

        let tdb_s = self.lsk().tdb_seconds(at);
        let jd_tt = self.lsk().tt_julian_date(at);
        let jd_ut1 = julian_date_utc(at);

        let mut ctx = ComputationContext::new();
        let earth = self.resolve_to_ssb_across(Body::Earth.code(), tdb_s, &mut ctx)?;
        let (site_pos, site_vel) = site.geocentric_state(jd_ut1, jd_tt);
        let observer_pos = add(&[earth[0], earth[1], earth[2]], &site_pos);
        let observer_vel = add(&[earth[3], earth[4], earth[5]], &site_vel);

        let mut light_time_s = 0.0;
        let mut relative = [0.0; 3];
        for _ in 0..LIGHT_TIME_ITERATIONS {
            let target = self.resolve_to_ssb_across(body.code(), tdb_s - light_time_s, &mut ctx)?;
            relative = sub(&[target[0], target[1], target[2]], &observer_pos);
            light_time_s = norm(&relative) / SPEED_OF_LIGHT_KM_S;
        }

        Ok(ApparentPlace {
            direction: aberrate(&unit(&relative), &observer_vel),
            distance_km: norm(&relative),
            light_time_s,
            jd_tt,
            jd_ut1,
        })
    }
}

/// First-order stellar aberration: `u' = u + β − (u·β) u`, renormalised.
pub fn aberrate(direction: &Vec3, observer_velocity_km_s: &Vec3) -> Vec3 {
    let beta = scale(observer_velocity_km_s, 1.0 / SPEED_OF_LIGHT_KM_S);
    let shifted = add(direction, &sub(&beta, &scale(direction, dot(direction, &beta))));
    unit(&shifted)
}
