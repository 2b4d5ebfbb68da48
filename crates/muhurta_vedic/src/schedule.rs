//! Market-hours schedule: horas clipped to the trading session.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use muhurta_core::{Ephemeris, GeoLocation};
use muhurta_time::{IST, civil_instant, to_ist};
use serde::Serialize;
use tracing::debug;

use crate::error::VedicError;
use crate::graha::Graha;
use crate::hora::{HoraSlot, hora_slots};
use crate::rahu_kaal::{RahuWindow, rahu_kaal};
use crate::riseset::day_window;
use crate::riseset_types::{DayWindow, RiseSetConfig};
use crate::vaar::Vaar;

const fn hm(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(t) => t,
        None => NaiveTime::MIN,
    }
}

/// NSE/BSE continuous session, IST.
pub const DEFAULT_MARKET_OPEN: NaiveTime = hm(9, 15);
pub const DEFAULT_MARKET_CLOSE: NaiveTime = hm(15, 30);

/// Trading session in IST wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarketSession {
    open: NaiveTime,
    close: NaiveTime,
}

impl Default for MarketSession {
    fn default() -> Self {
        Self {
            open: DEFAULT_MARKET_OPEN,
            close: DEFAULT_MARKET_CLOSE,
        }
    }
}

impl MarketSession {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self, VedicError> {
        if open >= close {
            return Err(VedicError::InvalidConfig("market open must precede close"));
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// Open and close instants on `date`.
    pub fn bounds_on(&self, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), VedicError> {
        Ok((
            civil_instant(date, self.open, IST)?,
            civil_instant(date, self.close, IST)?,
        ))
    }
}

/// Traffic-light status of a schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotStatus {
    Open,
    Rahu,
    Slow,
}

impl SlotStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Rahu => "RAHU",
            Self::Slow => "SLOW",
        }
    }

    pub const fn explanation(self) -> &'static str {
        match self {
            Self::Open => "Scalping Zone",
            Self::Rahu => "Trap Zone / High Risk",
            Self::Slow => "Low Momentum",
        }
    }
}

/// A hora clipped to the market session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduleEntry {
    /// Index of the source hora slot.
    pub hora_index: u8,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub ruler: Graha,
    /// Overlap with rahu-kaal, against the clipped bounds.
    pub is_rahu: bool,
}

impl ScheduleEntry {
    /// Rahu first, then a Saturn hora is slow, else open.
    pub fn status(&self) -> SlotStatus {
        if self.is_rahu {
            SlotStatus::Rahu
        } else if self.ruler == Graha::Shani {
            SlotStatus::Slow
        } else {
            SlotStatus::Open
        }
    }

    /// "09:15 AM - 10:02 AM" in IST.
    pub fn time_range_ist(&self) -> String {
        format!(
            "{} - {}",
            to_ist(&self.start).format("%I:%M %p"),
            to_ist(&self.end).format("%I:%M %p")
        )
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start <= *at && *at < self.end
    }
}

/// Clip hora slots to `[open, close]` and recompute rahu overlap.
pub fn market_schedule(
    slots: &[HoraSlot],
    open: DateTime<Utc>,
    close: DateTime<Utc>,
    rahu: &RahuWindow,
) -> Vec<ScheduleEntry> {
    slots
        .iter()
        .filter_map(|slot| {
            let start = slot.start.max(open);
            let end = slot.end.min(close);
            (start < end).then(|| ScheduleEntry {
                hora_index: slot.index,
                start,
                end,
                ruler: slot.ruler,
                is_rahu: rahu.overlaps(start, end),
            })
        })
        .collect()
}

/// Everything computed for one (date, location).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub site: GeoLocation,
    pub vaar: Vaar,
    pub day: Option<DayWindow>,
    pub rahu: Option<RahuWindow>,
    pub entries: Vec<ScheduleEntry>,
}

impl DaySchedule {
    /// English name of the day lord, or "Unknown" without a sunrise.
    pub fn day_lord_label(&self) -> &'static str {
        match self.day {
            Some(_) => self.vaar.lord().english_name(),
            None => "Unknown",
        }
    }

    pub fn is_market_closed(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry containing `now`, if any.
    pub fn active_entry(&self, now: &DateTime<Utc>) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.contains(now))
    }
}

/// Sunrise → rahu-kaal → horas → market clip for `date` at `site`.
pub fn compute_day_schedule<E: Ephemeris + ?Sized>(
    eph: &E,
    date: NaiveDate,
    site: &GeoLocation,
    session: &MarketSession,
    config: &RiseSetConfig,
) -> Result<DaySchedule, VedicError> {
    let vaar = Vaar::of_date(date);
    let Some(day) = day_window(eph, date, site, config)? else {
        debug!(%date, "no sunrise/sunset; empty schedule");
        return Ok(DaySchedule {
            date,
            site: *site,
            vaar,
            day: None,
            rahu: None,
            entries: Vec::new(),
        });
    };

    let rahu = rahu_kaal(vaar, &day);
    let slots = hora_slots(vaar, &day, &rahu);
    let (open, close) = session.bounds_on(date)?;
    let entries = market_schedule(&slots, open, close, &rahu);
    debug!(%date, entries = entries.len(), "computed day schedule");
    Ok(DaySchedule {
        date,
        site: *site,
        vaar,
        day: Some(day),
        rahu: Some(rahu),
        entries,
    })
}
