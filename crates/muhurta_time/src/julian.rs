//! Julian Date arithmetic.
//!
//! Calendar conversion follows Meeus, *Astronomical Algorithms*, ch. 7,
//! for the proleptic Gregorian calendar.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date of a calendar date; `day` may carry a fraction of a day.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b
        - 1524.5
}

/// Seconds past J2000 for a Julian Date in the same time scale.
pub fn jd_to_j2000_seconds(jd: f64) -> f64 {
    (jd - J2000_JD) * SECONDS_PER_DAY
}

/// Julian Date for seconds past J2000 in the same time scale.
pub fn j2000_seconds_to_jd(seconds: f64) -> f64 {
    J2000_JD + seconds / SECONDS_PER_DAY
}

/// Julian centuries since J2000 for a Julian Date.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Month number for a three-letter English abbreviation (case-insensitive).
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbrev))
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_noon() {
        assert_eq!(calendar_to_jd(2000, 1, 1.5), J2000_JD);
    }

    #[test]
    fn meeus_examples() {
        // Meeus example 7.a: 1957 Oct 4.81
        assert!((calendar_to_jd(1957, 10, 4.81) - 2_436_116.31).abs() < 1e-9);
        // 1972 Jan 1.0, first modern leap second epoch
        assert_eq!(calendar_to_jd(1972, 1, 1.0), 2_441_317.5);
        assert_eq!(calendar_to_jd(1970, 1, 1.0), UNIX_EPOCH_JD);
    }

    #[test]
    fn seconds_past_j2000() {
        assert_eq!(jd_to_j2000_seconds(J2000_JD + 1.0), 86_400.0);
        assert_eq!(j2000_seconds_to_jd(-43_200.0), J2000_JD - 0.5);
        assert!((julian_centuries(J2000_JD + 36_525.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn month_abbrevs() {
        assert_eq!(month_from_abbrev("JAN"), Some(1));
        assert_eq!(month_from_abbrev("jul"), Some(7));
        assert_eq!(month_from_abbrev("Dec"), Some(12));
        assert_eq!(month_from_abbrev("XYZ"), None);
    }
}
