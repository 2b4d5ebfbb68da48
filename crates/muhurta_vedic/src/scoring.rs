//! Per-index scoring of schedule entries against favourable rulers.

use muhurta_time::to_ist;
use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::schedule::ScheduleEntry;

/// Favourable and unfavourable hora rulers for one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexProfile {
    pub name: String,
    pub best: Vec<Graha>,
    pub worst: Vec<Graha>,
    /// Action shown for a favourable slot, e.g. "BUY CALL".
    pub strategy: String,
}

impl IndexProfile {
    pub fn new(name: &str, best: &[Graha], worst: &[Graha], strategy: &str) -> Self {
        Self {
            name: name.to_string(),
            best: best.to_vec(),
            worst: worst.to_vec(),
            strategy: strategy.to_string(),
        }
    }
}

/// NIFTY 50, BANK NIFTY, SENSEX and MIDCAP SEL.
pub fn default_index_profiles() -> Vec<IndexProfile> {
    use Graha::*;
    vec![
        IndexProfile::new("NIFTY 50", &[Guru, Surya], &[Shani, Rahu], "BUY CALL"),
        IndexProfile::new(
            "BANK NIFTY",
            &[Buddh, Mangal, Guru],
            &[Shani, Shukra],
            "BUY CALL",
        ),
        IndexProfile::new("SENSEX", &[Surya, Guru], &[Ketu, Shani], "BUY CALL"),
        IndexProfile::new("MIDCAP SEL", &[Mangal, Buddh], &[Shani], "SCALP"),
    ]
}

/// First non-rahu entry ruled by a favourable graha.
pub fn best_entry<'a>(
    entries: &'a [ScheduleEntry],
    profile: &IndexProfile,
) -> Option<&'a ScheduleEntry> {
    entries
        .iter()
        .find(|e| !e.is_rahu && profile.best.contains(&e.ruler))
}

/// Signal for one schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    /// Rahu-kaal overrides everything.
    RahuDanger,
    HighProbability,
    /// Unfavourable ruler.
    WorstRulerDanger,
    Neutral,
}

impl Signal {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RahuDanger | Self::WorstRulerDanger => "DANGER ZONE",
            Self::HighProbability => "HIGH PROBABILITY",
            Self::Neutral => "NEUTRAL",
        }
    }

    pub fn action<'a>(self, profile: &'a IndexProfile) -> &'a str {
        match self {
            Self::RahuDanger | Self::WorstRulerDanger => "NO TRADING",
            Self::HighProbability => &profile.strategy,
            Self::Neutral => "Wait for Setup",
        }
    }
}

pub fn classify(entry: &ScheduleEntry, profile: &IndexProfile) -> Signal {
    if entry.is_rahu {
        Signal::RahuDanger
    } else if profile.best.contains(&entry.ruler) {
        Signal::HighProbability
    } else if profile.worst.contains(&entry.ruler) {
        Signal::WorstRulerDanger
    } else {
        Signal::Neutral
    }
}

/// Summary card of one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexCard {
    pub name: String,
    /// "HH:MM" IST, or "None".
    pub best_entry: String,
    /// Strategy, or "WAIT" without a favourable slot.
    pub action: String,
}

pub fn index_card(entries: &[ScheduleEntry], profile: &IndexProfile) -> IndexCard {
    let (best_entry, action) = match best_entry(entries, profile) {
        Some(e) => (
            to_ist(&e.start).format("%H:%M").to_string(),
            profile.strategy.clone(),
        ),
        None => ("None".to_string(), "WAIT".to_string()),
    };
    IndexCard {
        name: profile.name.clone(),
        best_entry,
        action,
    }
}
