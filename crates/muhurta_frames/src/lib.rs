//! Reference frame helpers for apparent-place computations.
//!
//! Provides small 3-vector and rotation-matrix algebra, the ICRF ↔
//! ecliptic-of-J2000 rotation, IAU 1976 precession to the mean equator of
//! date, and Cartesian → spherical conversion.

pub mod precession;
pub mod rotation;
pub mod spherical;
pub mod vector;

pub use precession::precession_matrix;
pub use rotation::{
    Mat3, OBLIQUITY_J2000_RAD, ecliptic_to_icrf, icrf_to_ecliptic, rotate, rotate_transposed,
    rotation_z,
};
pub use spherical::{SphericalCoords, cartesian_to_spherical};
pub use vector::{Vec3, add, dot, norm, scale, sub, unit};
