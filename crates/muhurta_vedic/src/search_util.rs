//! Scan-and-bisect helpers over civil instants.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::VedicError;

/// Bisection never needs more halvings than this for a sub-day bracket.
const MAX_BISECTIONS: u32 = 64;

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// A sign change that is not a ±180° wrap of a normalized angle.
pub fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b <= 0.0 && (f_a - f_b).abs() < 270.0
}

/// Refine the zero of `f` between `t_a` and `t_b` until the bracket is
/// narrower than `tolerance`. `f_a` is `f(t_a)`.
pub fn bisect_instant<F>(
    mut t_a: DateTime<Utc>,
    mut f_a: f64,
    mut t_b: DateTime<Utc>,
    tolerance: TimeDelta,
    f: &F,
) -> Result<DateTime<Utc>, VedicError>
where
    F: Fn(&DateTime<Utc>) -> Result<f64, VedicError>,
{
    for _ in 0..MAX_BISECTIONS {
        if t_b - t_a <= tolerance {
            return Ok(t_a + (t_b - t_a) / 2);
        }
        let t_mid = t_a + (t_b - t_a) / 2;
        let f_mid = f(&t_mid)?;
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
    }
    Err(VedicError::NoConvergence("bisection bracket did not shrink"))
}
