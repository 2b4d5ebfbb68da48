//! Sunrise and sunset by scanning the Sun's apparent altitude.
//!
//! The topocentric altitude of the Sun's centre is sampled across the
//! window on a fixed step; every sign change of `altitude − h0` is refined
//! by bisection. Robust at any latitude: polar day or night simply yields
//! no crossings.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use muhurta_core::{Ephemeris, GeoLocation};
use muhurta_time::{IST, local_midnight};
use tracing::debug;

use crate::error::VedicError;
use crate::riseset_types::{DayWindow, RiseSetConfig, RiseSetCrossing, RiseSetEvent};
use crate::search_util::bisect_instant;

/// All sunrise/sunset crossings in `[start, end]`, chronological.
pub fn find_rise_set_events<E: Ephemeris + ?Sized>(
    eph: &E,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    site: &GeoLocation,
    config: &RiseSetConfig,
) -> Result<Vec<RiseSetCrossing>, VedicError> {
    config.validate().map_err(VedicError::InvalidConfig)?;
    let h0 = config.horizon_altitude_deg();
    let f = |t: &DateTime<Utc>| -> Result<f64, VedicError> {
        Ok(eph.sun_altitude_deg(t, site)? - h0)
    };

    let mut crossings = Vec::new();
    let mut t_prev = start;
    let mut f_prev = f(&t_prev)?;
    while t_prev < end {
        let t_next = (t_prev + config.scan_step).min(end);
        let f_next = f(&t_next)?;
        if (f_prev < 0.0) != (f_next < 0.0) {
            let event = if f_prev < 0.0 {
                RiseSetEvent::Sunrise
            } else {
                RiseSetEvent::Sunset
            };
            let at = bisect_instant(t_prev, f_prev, t_next, config.tolerance, &f)?;
            crossings.push(RiseSetCrossing { event, at });
        }
        t_prev = t_next;
        f_prev = f_next;
    }
    Ok(crossings)
}

/// Day window of `date`, searched from IST midnight over 24 hours.
///
/// Takes the first sunrise and first sunset. `None` when either is missing
/// or the first sunset precedes the first sunrise.
pub fn day_window<E: Ephemeris + ?Sized>(
    eph: &E,
    date: NaiveDate,
    site: &GeoLocation,
    config: &RiseSetConfig,
) -> Result<Option<DayWindow>, VedicError> {
    let start = local_midnight(date, IST)?;
    let crossings = find_rise_set_events(eph, start, start + TimeDelta::days(1), site, config)?;
    let first = |kind: RiseSetEvent| {
        crossings
            .iter()
            .find(|c| c.event == kind)
            .map(|c| c.at)
    };
    let window = match (first(RiseSetEvent::Sunrise), first(RiseSetEvent::Sunset)) {
        (Some(rise), Some(set)) => DayWindow::new(rise, set),
        _ => None,
    };
    debug!(%date, crossings = crossings.len(), found = window.is_some(), "day window");
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeSky, ist_hour, sine_day_crossings};

    fn site() -> GeoLocation {
        GeoLocation::new(27.61, 94.73, 0.0)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn sine_day_matches_analytic_crossings() {
        let config = RiseSetConfig::default();
        let (rise_h, set_h) = sine_day_crossings(config.horizon_altitude_deg());
        let window = day_window(&FakeSky::with_altitude(crate::test_support::sine_day), date(), &site(), &config)
            .unwrap()
            .unwrap();
        assert!((ist_hour(&window.sunrise) - rise_h).abs() * 3600.0 < 0.2);
        assert!((ist_hour(&window.sunset) - set_h).abs() * 3600.0 < 0.2);
        // 05:55 IST sunrise
        assert!((ist_hour(&window.sunrise) - 5.920).abs() < 0.001);
    }

    #[test]
    fn polar_night_has_no_window() {
        let sky = FakeSky::with_altitude(|_| -10.0);
        let config = RiseSetConfig::default();
        assert_eq!(day_window(&sky, date(), &site(), &config).unwrap(), None);
        let start = local_midnight(date(), IST).unwrap();
        let events =
            find_rise_set_events(&sky, start, start + TimeDelta::days(1), &site(), &config).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn sunset_before_sunrise_has_no_window() {
        // Sun up at midnight, sets at 06:00, rises at 18:00.
        let sky = FakeSky::with_altitude(|h| -crate::test_support::sine_day(h));
        let config = RiseSetConfig::default();
        let start = local_midnight(date(), IST).unwrap();
        let events =
            find_rise_set_events(&sky, start, start + TimeDelta::days(1), &site(), &config).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, RiseSetEvent::Sunset);
        assert_eq!(events[1].event, RiseSetEvent::Sunrise);
        assert_eq!(day_window(&sky, date(), &site(), &config).unwrap(), None);
    }

    #[test]
    fn events_are_chronological() {
        let config = RiseSetConfig::default();
        let start = local_midnight(date(), IST).unwrap();
        let events = find_rise_set_events(
            &FakeSky::with_altitude(crate::test_support::sine_day),
            start,
            start + TimeDelta::days(3),
            &site(),
            &config,
        )
        .unwrap();
        assert_eq!(events.len(), 6);
        assert!(events.windows(2).all(|w| w[0].at < w[1].at));
    }
}
