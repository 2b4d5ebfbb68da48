//! Rotation matrices and the ICRF ↔ ecliptic-of-J2000 rotation.
//!
//! Matrices rotate the coordinate frame (passive convention), so
//! `rotation_z(θ)` expresses a vector in axes turned by `θ` about +z.

use crate::vector::Vec3;

pub type Mat3 = [[f64; 3]; 3];

/// Mean obliquity of the ecliptic at J2000.0 (IAU 2006, 84381.406″).
pub const OBLIQUITY_J2000_RAD: f64 = 84_381.406 / 3600.0 * std::f64::consts::PI / 180.0;

pub fn rotation_x(angle_rad: f64) -> Mat3 {
    let (s, c) = angle_rad.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]]
}

pub fn rotation_y(angle_rad: f64) -> Mat3 {
    let (s, c) = angle_rad.sin_cos();
    [[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]]
}

pub fn rotation_z(angle_rad: f64) -> Mat3 {
    let (s, c) = angle_rad.sin_cos();
    [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// `a · b`
pub fn multiply(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// `m · v`
pub fn rotate(m: &Mat3, v: &Vec3) -> Vec3 {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// `mᵀ · v`, the inverse rotation.
pub fn rotate_transposed(m: &Mat3, v: &Vec3) -> Vec3 {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2],
    ]
}

/// ICRF (equatorial J2000) → ecliptic of J2000.
pub fn icrf_to_ecliptic(v: &Vec3) -> Vec3 {
    rotate(&rotation_x(OBLIQUITY_J2000_RAD), v)
}

/// Ecliptic of J2000 → ICRF.
pub fn ecliptic_to_icrf(v: &Vec3) -> Vec3 {
    rotate_transposed(&rotation_x(OBLIQUITY_J2000_RAD), v)
}
