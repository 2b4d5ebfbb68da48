//! Vedic planet (graha) enum.
//!
//! Hora rulers are the seven classical grahas; Rahu and Ketu appear only in
//! index profiles.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;

/// The 9 Vedic grahas. Serialized by English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Graha {
    #[serde(rename = "Sun")]
    Surya,
    #[serde(rename = "Moon")]
    Chandra,
    #[serde(rename = "Mars")]
    Mangal,
    #[serde(rename = "Mercury")]
    Buddh,
    #[serde(rename = "Jupiter")]
    Guru,
    #[serde(rename = "Venus")]
    Shukra,
    #[serde(rename = "Saturn")]
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for Graha {
    type Err = VedicError;

    /// Accepts English or Sanskrit names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_GRAHAS
            .into_iter()
            .find(|g| g.english_name().eq_ignore_ascii_case(s) || g.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| VedicError::UnknownName(s.to_string()))
    }
}
