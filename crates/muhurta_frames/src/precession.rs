//! IAU 1976 precession from the J2000 mean equator to the mean equator of date.
//!
//! Source: Lieske et al. 1977; Explanatory Supplement to the Astronomical
//! Almanac (1992) eq. 3.211-2. The ζ, z, θ angles are cubic in Julian
//! centuries of TT from J2000.

use crate::rotation::{Mat3, multiply, rotation_y, rotation_z};

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;

/// Precession angles `(ζ, z, θ)` in radians for TT centuries `t` since J2000.
pub fn precession_angles(t: f64) -> (f64, f64, f64) {
    let zeta = t * (2306.2181 + t * (0.30188 + t * 0.017998));
    let z = t * (2306.2181 + t * (1.09468 + t * 0.018203));
    let theta = t * (2004.3109 + t * (-0.42665 - t * 0.041833));
    (zeta * ARCSEC_TO_RAD, z * ARCSEC_TO_RAD, theta * ARCSEC_TO_RAD)
}

/// Matrix taking J2000 mean-equator vectors to mean equator and equinox of date:
/// `P = R_z(−z) · R_y(θ) · R_z(−ζ)`.
pub fn precession_matrix(t: f64) -> Mat3 {
    let (zeta, z, theta) = precession_angles(t);
    multiply(
        &rotation_z(-z),
        &multiply(&rotation_y(theta), &rotation_z(-zeta)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::rotate;

    #[test]
    fn identity_at_j2000() {
        let p = precession_matrix(0.0);
        for (i, row) in p.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                assert_eq!(*cell, if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn equinox_moves_about_fifty_arcsec_per_year() {
        // Over 24 years the equinox direction turns by about 24 × 50.3″.
        let p = precession_matrix(0.24);
        let x = rotate(&p, &[1.0, 0.0, 0.0]);
        let angle_arcsec = x[0].clamp(-1.0, 1.0).acos() / ARCSEC_TO_RAD;
        assert!((angle_arcsec - 24.0 * 50.29).abs() < 30.0, "{angle_arcsec}″");
    }

    #[test]
    fn meeus_example_21b_matrix_elements() {
        // Meeus ex. 21.b: t = 0.288670500 centuries gives
        // ζ = 0.1850°, z = 0.1851°, θ = 0.1606° (rounded).
        let (zeta, z, theta) = precession_angles(0.288_670_500);
        assert!((zeta.to_degrees() - 0.1850).abs() < 1e-3);
        assert!((z.to_degrees() - 0.1851).abs() < 1e-3);
        assert!((theta.to_degrees() - 0.1607).abs() < 1e-3);
    }
}
