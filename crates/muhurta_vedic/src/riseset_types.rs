//! Types for sunrise/sunset calculations.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Rise/set event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiseSetEvent {
    /// Upper limb of the Sun clears the refracted horizon.
    Sunrise,
    /// Upper limb disappears below the refracted horizon.
    Sunset,
}

/// Configurable parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semi-diameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
    /// Coarse sampling step of the altitude scan. Default: 30 minutes.
    pub scan_step: TimeDelta,
    /// Bisection stops once the bracket is this narrow. Default: 100 ms.
    pub tolerance: TimeDelta,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
            scan_step: TimeDelta::minutes(30),
            tolerance: TimeDelta::milliseconds(100),
        }
    }
}

impl RiseSetConfig {
    /// Altitude of the Sun's centre at rise/set, in degrees (negative).
    ///
    /// `h0 = −(refraction + semidiameter) / 60`
    pub fn horizon_altitude_deg(&self) -> f64 {
        -(self.refraction_arcmin + self.semidiameter_arcmin) / 60.0
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.scan_step <= TimeDelta::zero() {
            return Err("scan_step must be positive");
        }
        if self.tolerance <= TimeDelta::zero() {
            return Err("tolerance must be positive");
        }
        if !self.refraction_arcmin.is_finite() || !self.semidiameter_arcmin.is_finite() {
            return Err("horizon corrections must be finite");
        }
        Ok(())
    }
}

/// One horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiseSetCrossing {
    pub event: RiseSetEvent,
    pub at: DateTime<Utc>,
}

/// Daylight interval of one civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayWindow {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl DayWindow {
    /// `None` unless `sunrise < sunset`.
    pub fn new(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Option<Self> {
        (sunrise < sunset).then_some(Self { sunrise, sunset })
    }

    pub fn duration(&self) -> TimeDelta {
        self.sunset - self.sunrise
    }
}
