//! Topocentric observer on the WGS84 ellipsoid.

use muhurta_frames::{Vec3, precession_matrix, rotate_transposed, rotation_z};
use muhurta_time::{gmst, julian::julian_centuries};
use serde::{Deserialize, Serialize};

/// WGS84 equatorial radius in km.
pub const WGS84_RADIUS_KM: f64 = 6378.137;
/// WGS84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;
/// Mean angular velocity of Earth rotation, rad/s.
pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115_146_706_979e-5;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above the ellipsoid in meters.
    #[serde(default)]
    pub altitude_m: f64,
}

impl GeoLocation {
    pub const fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Latitude within ±90°, longitude within ±180°, all values finite.
    pub fn is_valid(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && self.altitude_m.is_finite()
            && self.latitude_deg.abs() <= 90.0
            && self.longitude_deg.abs() <= 180.0
    }

    /// Hashable identity of the coordinate (bit patterns of lat/lon).
    pub fn key(&self) -> (u64, u64) {
        (self.latitude_deg.to_bits(), self.longitude_deg.to_bits())
    }

    /// Earth-fixed (ITRS) position in km.
    pub fn terrestrial_position_km(&self) -> Vec3 {
        let e2 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);
        let (sin_lat, cos_lat) = self.latitude_rad().sin_cos();
        let (sin_lon, cos_lon) = self.longitude_rad().sin_cos();
        let n = WGS84_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let h = self.altitude_m / 1000.0;
        [
            (n + h) * cos_lat * cos_lon,
            (n + h) * cos_lat * sin_lon,
            (n * (1.0 - e2) + h) * sin_lat,
        ]
    }

    /// Geocentric position (km) and velocity (km/s) on J2000 axes.
    ///
    /// The Earth-fixed vector is turned by mean sidereal time onto the mean
    /// equator of date, then precessed back to J2000. Polar motion and
    /// nutation are neglected.
    pub fn geocentric_state(&self, jd_ut1: f64, jd_tt: f64) -> (Vec3, Vec3) {
        let itrs = self.terrestrial_position_km();
        let of_date = rotate_transposed(&rotation_z(gmst(jd_ut1)), &itrs);
        let velocity_of_date = [
            -EARTH_ROTATION_RAD_S * of_date[1],
            EARTH_ROTATION_RAD_S * of_date[0],
            0.0,
        ];
        let precession = precession_matrix(julian_centuries(jd_tt));
        (
            rotate_transposed(&precession, &of_date),
            rotate_transposed(&precession, &velocity_of_date),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muhurta_frames::norm;

    #[test]
    fn equator_and_pole_radii() {
        let eq = GeoLocation::new(0.0, 0.0, 0.0).terrestrial_position_km();
        assert!((eq[0] - WGS84_RADIUS_KM).abs() < 1e-9);
        let pole = GeoLocation::new(90.0, 0.0, 0.0).terrestrial_position_km();
        assert!((pole[2] - 6356.752_314).abs() < 1e-5, "polar radius {}", pole[2]);
    }

    #[test]
    fn altitude_raises_position() {
        let low = GeoLocation::new(26.1445, 91.7362, 0.0).terrestrial_position_km();
        let high = GeoLocation::new(26.1445, 91.7362, 1000.0).terrestrial_position_km();
        assert!((norm(&high) - norm(&low) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn rotation_preserves_distance_and_speed() {
        let site = GeoLocation::new(27.61, 94.73, 0.0);
        let (pos, vel) = site.geocentric_state(2_460_390.25, 2_460_390.2508);
        assert!((norm(&pos) - norm(&site.terrestrial_position_km())).abs() < 1e-9);
        // ~0.41 km/s at latitude 27.6°
        let speed = norm(&vel);
        assert!((speed - 0.4118).abs() < 0.002, "speed {speed}");
    }

    #[test]
    fn validity_checks() {
        assert!(GeoLocation::new(27.61, 94.73, 0.0).is_valid());
        assert!(!GeoLocation::new(91.0, 0.0, 0.0).is_valid());
        assert!(!GeoLocation::new(0.0, f64::NAN, 0.0).is_valid());
    }
}
