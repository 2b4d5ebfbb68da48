//! Serializable dashboard records built from a day schedule.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use muhurta_feed::Headline;
use muhurta_time::{IST, TimeError, civil_instant, to_ist, today_ist};
use muhurta_vedic::{
    DaySchedule, IndexCard, IndexProfile, NamedLocation, classify, index_card,
};
use serde::Serialize;

use crate::context::{AppContext, TithiSnapshot};

/// One row of the market schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRecord {
    pub time_range: String,
    pub ruler: String,
    pub is_rahu: bool,
    pub status: String,
    pub explanation: String,
    pub active: bool,
}

/// One row of an index planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannerRecord {
    pub time_range: String,
    pub ruler: String,
    pub signal: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexPlan {
    pub name: String,
    pub market_closed: bool,
    pub rows: Vec<PlannerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub date: String,
    pub day_lord: String,
    pub tithi: String,
    pub tithi_ends: Option<String>,
    pub location: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub rahu_kaal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub header: Header,
    pub cards: Vec<IndexCard>,
    pub headlines: Vec<Headline>,
    pub schedule: Vec<SlotRecord>,
    pub planner: Vec<IndexPlan>,
    pub market_closed: bool,
}

/// One row of the location table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub slug: &'static str,
    pub name: &'static str,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub selected: bool,
}

pub fn location_records(selected: NamedLocation) -> Vec<LocationRecord> {
    NamedLocation::ALL
        .into_iter()
        .map(|loc| {
            let geo = loc.geo();
            LocationRecord {
                slug: loc.slug(),
                name: loc.name(),
                latitude_deg: geo.latitude_deg,
                longitude_deg: geo.longitude_deg,
                selected: loc == selected,
            }
        })
        .collect()
}

/// Now when `target` is today in IST, else `market_open` IST on `target`.
pub fn calc_instant(
    target: NaiveDate,
    now: &DateTime<Utc>,
    market_open: NaiveTime,
) -> Result<DateTime<Utc>, TimeError> {
    if target == today_ist(now) {
        Ok(*now)
    } else {
        civil_instant(target, market_open, IST)
    }
}

fn clock(at: &DateTime<Utc>) -> String {
    to_ist(at).format("%I:%M %p").to_string()
}

/// Schedule rows; `now` marks the active slot and is `None` for other days.
pub fn slot_records(schedule: &DaySchedule, now: Option<&DateTime<Utc>>) -> Vec<SlotRecord> {
    schedule
        .entries
        .iter()
        .map(|entry| {
            let status = entry.status();
            SlotRecord {
                time_range: entry.time_range_ist(),
                ruler: entry.ruler.english_name().to_string(),
                is_rahu: entry.is_rahu,
                status: status.label().to_string(),
                explanation: status.explanation().to_string(),
                active: now.is_some_and(|t| entry.contains(t)),
            }
        })
        .collect()
}

pub fn index_plan(schedule: &DaySchedule, profile: &IndexProfile) -> IndexPlan {
    IndexPlan {
        name: profile.name.clone(),
        market_closed: schedule.is_market_closed(),
        rows: schedule
            .entries
            .iter()
            .map(|entry| {
                let signal = classify(entry, profile);
                PlannerRecord {
                    time_range: entry.time_range_ist(),
                    ruler: entry.ruler.english_name().to_string(),
                    signal: signal.label().to_string(),
                    action: signal.action(profile).to_string(),
                }
            })
            .collect(),
    }
}

pub fn header(schedule: &DaySchedule, location: NamedLocation, tithi: &TithiSnapshot) -> Header {
    Header {
        date: schedule.date.format("%d %b %Y").to_string(),
        day_lord: schedule.day_lord_label().to_string(),
        tithi: tithi.info.to_string(),
        tithi_ends: tithi
            .ends
            .map(|t| to_ist(&t).format("%d %b %I:%M %p").to_string()),
        location: location.name().to_string(),
        sunrise: schedule.day.map(|d| clock(&d.sunrise)),
        sunset: schedule.day.map(|d| clock(&d.sunset)),
        rahu_kaal: schedule
            .rahu
            .map(|r| format!("{} - {}", clock(&r.start), clock(&r.end))),
    }
}

/// Assemble every section for `date` at `location`.
pub fn build_dashboard(
    ctx: &mut AppContext,
    date: NaiveDate,
    location: NamedLocation,
    now: &DateTime<Utc>,
    with_news: bool,
) -> anyhow::Result<Dashboard> {
    let site = location.geo();
    let schedule = ctx.schedule(date, &site)?;
    let at = calc_instant(date, now, ctx.session.open())?;
    let tithi = ctx.tithi(&at, &site)?;
    let is_today = date == today_ist(now);
    let profiles = ctx.config.indices.clone();
    let headlines = if with_news { ctx.headlines() } else { Vec::new() };

    Ok(Dashboard {
        header: header(&schedule, location, &tithi),
        cards: profiles
            .iter()
            .map(|p| index_card(&schedule.entries, p))
            .collect(),
        headlines,
        schedule: slot_records(&schedule, is_today.then_some(now)),
        planner: profiles.iter().map(|p| index_plan(&schedule, p)).collect(),
        market_closed: schedule.is_market_closed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use muhurta_vedic::schedule::DEFAULT_MARKET_OPEN;
    use muhurta_vedic::{
        DayWindow, Graha, RahuWindow, ScheduleEntry, Vaar, default_index_profiles,
        tithi_from_elongation,
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    fn ist(h: u32, m: u32) -> DateTime<Utc> {
        civil_instant(date(), NaiveTime::from_hms_opt(h, m, 0).unwrap(), IST).unwrap()
    }

    fn entry(h0: u32, m0: u32, h1: u32, m1: u32, ruler: Graha, is_rahu: bool) -> ScheduleEntry {
        ScheduleEntry {
            hora_index: 0,
            start: ist(h0, m0),
            end: ist(h1, m1),
            ruler,
            is_rahu,
        }
    }

    fn schedule() -> DaySchedule {
        DaySchedule {
            date: date(),
            site: NamedLocation::Silapathar.geo(),
            vaar: Vaar::Somvaar,
            day: DayWindow::new(ist(5, 30), ist(17, 30)),
            rahu: Some(RahuWindow {
                start: ist(7, 0),
                end: ist(8, 30),
            }),
            entries: vec![
                entry(9, 15, 9, 30, Graha::Shani, false),
                entry(9, 30, 10, 30, Graha::Guru, false),
                entry(10, 30, 11, 30, Graha::Mangal, true),
            ],
        }
    }

    #[test]
    fn today_uses_now_other_days_market_open() {
        let open = DEFAULT_MARKET_OPEN;
        let now = Utc.with_ymd_and_hms(2024, 3, 18, 5, 0, 0).unwrap();
        assert_eq!(calc_instant(date(), &now, open).unwrap(), now);
        let tomorrow = date() + TimeDelta::days(1);
        let at = calc_instant(tomorrow, &now, open).unwrap();
        assert_eq!(to_ist(&at).format("%Y-%m-%d %H:%M").to_string(), "2024-03-19 09:15");
    }

    #[test]
    fn other_days_follow_configured_open() {
        let mut config = crate::config::AppConfig::default();
        config.market.open = "10:00".to_string();
        let open = config.market_session().unwrap().open();
        let now = Utc.with_ymd_and_hms(2024, 3, 18, 5, 0, 0).unwrap();
        let at = calc_instant(date() - TimeDelta::days(1), &now, open).unwrap();
        assert_eq!(to_ist(&at).format("%Y-%m-%d %H:%M").to_string(), "2024-03-17 10:00");
        // Today still uses now regardless of the session.
        assert_eq!(calc_instant(date(), &now, open).unwrap(), now);
    }

    #[test]
    fn slot_rows_mark_status_and_active() {
        let now = ist(9, 45);
        let rows = slot_records(&schedule(), Some(&now));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].status, "SLOW");
        assert_eq!(rows[0].time_range, "09:15 AM - 09:30 AM");
        assert_eq!(rows[1].status, "OPEN");
        assert_eq!(rows[1].explanation, "Scalping Zone");
        assert!(rows[1].active);
        assert_eq!(rows[2].status, "RAHU");
        assert_eq!(rows.iter().filter(|r| r.active).count(), 1);
        assert!(slot_records(&schedule(), None).iter().all(|r| !r.active));
    }

    #[test]
    fn planner_rows_follow_signal_priority() {
        let bank_nifty = &default_index_profiles()[1];
        let plan = index_plan(&schedule(), bank_nifty);
        let signals: Vec<&str> = plan.rows.iter().map(|r| r.signal.as_str()).collect();
        assert_eq!(signals, ["DANGER ZONE", "HIGH PROBABILITY", "DANGER ZONE"]);
        assert_eq!(plan.rows[1].action, "BUY CALL");
        assert!(!plan.market_closed);
    }

    #[test]
    fn header_lists_day_facts() {
        let snapshot = TithiSnapshot {
            info: tithi_from_elongation(170.0),
            ends: Some(ist(14, 5)),
        };
        let h = header(&schedule(), NamedLocation::Silapathar, &snapshot);
        assert_eq!(h.date, "18 Mar 2024");
        assert_eq!(h.day_lord, "Moon");
        assert_eq!(h.tithi, "Purnima (Shukla)");
        assert_eq!(h.tithi_ends.as_deref(), Some("18 Mar 02:05 PM"));
        assert_eq!(h.sunrise.as_deref(), Some("05:30 AM"));
        assert_eq!(h.rahu_kaal.as_deref(), Some("07:00 AM - 08:30 AM"));
    }

    #[test]
    fn closed_market_header_is_unknown() {
        let closed = DaySchedule {
            day: None,
            rahu: None,
            entries: Vec::new(),
            ..schedule()
        };
        let snapshot = TithiSnapshot {
            info: tithi_from_elongation(359.0),
            ends: None,
        };
        let h = header(&closed, NamedLocation::Guwahati, &snapshot);
        assert_eq!(h.day_lord, "Unknown");
        assert_eq!(h.sunrise, None);
        assert!(index_plan(&closed, &default_index_profiles()[0]).market_closed);
    }
}
