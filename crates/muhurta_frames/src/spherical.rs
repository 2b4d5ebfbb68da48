//! Cartesian → spherical conversion.

use crate::vector::{Vec3, norm};

/// Longitude/latitude/distance of a Cartesian vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Degrees in `[0, 360)`, from +x toward +y.
    pub lon_deg: f64,
    /// Degrees in `[-90, 90]` above the x-y plane.
    pub lat_deg: f64,
    /// Same unit as the input vector.
    pub distance: f64,
}

pub fn cartesian_to_spherical(v: &Vec3) -> SphericalCoords {
    let r = norm(v);
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance: 0.0,
        };
    }
    let lon = v[1].atan2(v[0]).to_degrees().rem_euclid(360.0);
    SphericalCoords {
        // rem_euclid can round a tiny negative angle up to exactly 360.
        lon_deg: if lon >= 360.0 { 0.0 } else { lon },
        lat_deg: (v[2] / r).clamp(-1.0, 1.0).asin().to_degrees(),
        distance: r,
    }
}
