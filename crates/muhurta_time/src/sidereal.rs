//! Earth rotation angle and mean sidereal time.
//!
//! Inputs are UT1 Julian dates; UT1 is taken equal to UTC throughout this
//! workspace, which keeps hour angles within about 1 s of time.
//!
//! Sources: IERS Conventions 2010 eq. 5.15 (ERA) and Capitaine et al. 2003
//! (GMST polynomial).

use std::f64::consts::TAU;

use crate::julian::{J2000_JD, julian_centuries};

const ARCSEC: f64 = TAU / 1_296_000.0;

/// Earth rotation angle, radians in `[0, 2π)`.
///
/// Evaluated as `2π (frac(Du) + 0.7790572732640 + 0.00273781191135448 Du)`
/// so the whole-day part of `Du` never multiplies the rate constant.
pub fn earth_rotation_angle(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    let turns = du.fract() + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du;
    (TAU * turns).rem_euclid(TAU)
}

/// Greenwich mean sidereal time, radians in `[0, 2π)`.
pub fn gmst(jd_ut1: f64) -> f64 {
    let t = julian_centuries(jd_ut1);
    let poly = 0.014_506
        + t * (4_612.156_534 + t * (1.391_581_7 + t * (-0.000_000_44 + t * (-0.000_029_956 - t * 0.000_000_036_8))));
    (earth_rotation_angle(jd_ut1) + poly * ARCSEC).rem_euclid(TAU)
}

/// Local mean sidereal time for an east-positive longitude, radians.
pub fn local_sidereal_time(jd_ut1: f64, east_longitude_rad: f64) -> f64 {
    (gmst(jd_ut1) + east_longitude_rad).rem_euclid(TAU)
}
