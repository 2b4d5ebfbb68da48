//! Rahu-kaal: one weekday-dependent eighth of daylight.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::riseset_types::DayWindow;
use crate::vaar::Vaar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RahuWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RahuWindow {
    /// Half-open overlap with `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// Rahu-kaal of `vaar` within `day`.
pub fn rahu_kaal(vaar: Vaar, day: &DayWindow) -> RahuWindow {
    let part = day.duration() / 8;
    let start = day.sunrise + part * (i32::from(vaar.rahu_kaal_eighth()) - 1);
    RahuWindow {
        start,
        end: start + part,
    }
}
