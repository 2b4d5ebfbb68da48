//! Planetary hours (hora) from sunrise.
//!
//! Daylight is split into 12 equal horas; the first is ruled by the day
//! lord and rulers then follow the Chaldean descending order. Sixteen slots
//! are generated so that the market session is covered on short days.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::graha::Graha;
use crate::rahu_kaal::RahuWindow;
use crate::riseset_types::DayWindow;
use crate::vaar::Vaar;

/// Hora ruler succession.
pub const HORA_ROTATION: [Graha; 7] = [
    Graha::Surya,
    Graha::Shukra,
    Graha::Buddh,
    Graha::Chandra,
    Graha::Shani,
    Graha::Guru,
    Graha::Mangal,
];

pub const HORAS_PER_DAYLIGHT: i32 = 12;
pub const HORA_SLOT_COUNT: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HoraSlot {
    /// 0-based slot number counted from sunrise.
    pub index: u8,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub ruler: Graha,
    pub is_rahu: bool,
}

/// Position of `graha` in [`HORA_ROTATION`].
pub fn rotation_position(graha: Graha) -> Option<usize> {
    HORA_ROTATION.iter().position(|&g| g == graha)
}

/// Ruler of slot `index` on a day of `vaar`.
pub fn hora_ruler(vaar: Vaar, index: u8) -> Graha {
    // The day lord is always one of the seven rotation grahas.
    let start = rotation_position(vaar.lord()).unwrap_or(0);
    HORA_ROTATION[(start + usize::from(index)) % HORA_ROTATION.len()]
}

/// The 16 hora slots of a day; `is_rahu` against the unclipped bounds.
pub fn hora_slots(vaar: Vaar, day: &DayWindow, rahu: &RahuWindow) -> Vec<HoraSlot> {
    let hora_len = day.duration() / HORAS_PER_DAYLIGHT;
    (0..HORA_SLOT_COUNT)
        .map(|index| {
            let start = day.sunrise + hora_len * i32::from(index);
            let end = start + hora_len;
            HoraSlot {
                index,
                start,
                end,
                ruler: hora_ruler(vaar, index),
                is_rahu: rahu.overlaps(start, end),
            }
        })
        .collect()
}
