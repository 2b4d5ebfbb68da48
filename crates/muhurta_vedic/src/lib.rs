//! Panchang and hora timing on top of the ephemeris engine.
//!
//! This crate provides:
//! - Graha and vaar (weekday) tables
//! - Linear ayanamsha and sidereal longitude
//! - Tithi classification and end-time search
//! - Sunrise/sunset by altitude scan
//! - Rahu-kaal and hora slots
//! - Market-hours schedule and per-index scoring
//! - The fixed location table
//!
//! All calculations take an [`muhurta_core::Ephemeris`] so they run equally
//! against DE kernels and synthetic skies.

pub mod ayanamsha;
pub mod error;
pub mod graha;
pub mod hora;
pub mod location;
pub mod rahu_kaal;
pub mod riseset;
pub mod riseset_types;
pub mod schedule;
pub mod scoring;
pub mod search_util;
pub mod tithi;
pub mod vaar;

#[cfg(test)]
mod test_support;

pub use ayanamsha::{ayanamsha_deg, normalize_360, sidereal_longitude};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha};
pub use hora::{HORA_ROTATION, HoraSlot, hora_ruler, hora_slots};
pub use location::NamedLocation;
pub use rahu_kaal::{RahuWindow, rahu_kaal};
pub use riseset::{day_window, find_rise_set_events};
pub use riseset_types::{DayWindow, RiseSetConfig, RiseSetCrossing, RiseSetEvent};
pub use schedule::{
    DaySchedule, MarketSession, ScheduleEntry, SlotStatus, compute_day_schedule, market_schedule,
};
pub use scoring::{
    IndexCard, IndexProfile, Signal, best_entry, classify, default_index_profiles, index_card,
};
pub use tithi::{Paksha, TithiInfo, elongation_at, tithi_at, tithi_end, tithi_from_elongation};
pub use vaar::{RAHU_KAAL_EIGHTH, Vaar};
