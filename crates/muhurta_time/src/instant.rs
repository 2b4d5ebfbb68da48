//! Bridge between `chrono` instants and the J2000-based time scales.
//!
//! Civil instants are `DateTime<Utc>`. Their "UTC seconds past J2000"
//! count ignores leap seconds, which is the convention the LSK tables use.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, UNIX_EPOCH_JD};

/// Indian Standard Time, the display and market zone.
pub const IST: Tz = chrono_tz::Asia::Kolkata;

/// Unix timestamp of 2000-01-01 12:00:00 UTC.
const J2000_UNIX_SECONDS: i64 = 946_728_000;

/// UTC seconds past J2000 for an instant.
pub fn utc_seconds_past_j2000(at: &DateTime<Utc>) -> f64 {
    (at.timestamp() - J2000_UNIX_SECONDS) as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9
}

/// Julian Date (UTC) of an instant.
pub fn julian_date_utc(at: &DateTime<Utc>) -> f64 {
    let unix = at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + unix / SECONDS_PER_DAY
}

/// Instant for UTC seconds past J2000, rounded to the millisecond.
pub fn from_utc_seconds_past_j2000(utc_s: f64) -> Result<DateTime<Utc>, TimeError> {
    let millis = (utc_s * 1_000.0).round();
    if !millis.is_finite() || millis.abs() > 9.0e15 {
        return Err(TimeError::OutOfRange(format!("{utc_s} s past J2000")));
    }
    DateTime::from_timestamp_millis(J2000_UNIX_SECONDS * 1_000 + millis as i64)
        .ok_or_else(|| TimeError::OutOfRange(format!("{utc_s} s past J2000")))
}

/// The instant at which `time` occurs on `date` in `zone`.
pub fn civil_instant(date: NaiveDate, time: NaiveTime, zone: Tz) -> Result<DateTime<Utc>, TimeError> {
    match zone.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(..) => Err(TimeError::InvalidLocalTime(format!(
            "{date} {time} is ambiguous in {zone}"
        ))),
        LocalResult::None => Err(TimeError::InvalidLocalTime(format!(
            "{date} {time} does not exist in {zone}"
        ))),
    }
}

/// Midnight at the start of `date` in `zone`.
pub fn local_midnight(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>, TimeError> {
    civil_instant(date, NaiveTime::MIN, zone)
}

/// An instant viewed in IST.
pub fn to_ist(at: &DateTime<Utc>) -> DateTime<Tz> {
    at.with_timezone(&IST)
}

/// Today's civil date in IST.
pub fn today_ist(now: &DateTime<Utc>) -> NaiveDate {
    to_ist(now).date_naive()
}
