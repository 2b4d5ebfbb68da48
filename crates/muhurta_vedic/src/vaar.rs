//! Weekday (vaar), its lord and its rahu-kaal eighth.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::graha::Graha;

/// Rahu-kaal eighth (1-based) of daylight, indexed Monday = 0.
pub const RAHU_KAAL_EIGHTH: [u8; 7] = [2, 7, 5, 6, 4, 3, 8];

/// Day lord, indexed Monday = 0.
pub const VAAR_LORDS: [Graha; 7] = [
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Surya,
];

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Vaar {
    Somvaar,
    Mangalvaar,
    Budhvaar,
    Guruvaar,
    Shukravaar,
    Shanivaar,
    Ravivaar,
}

/// Weekdays in Monday-first order.
pub const ALL_VAARS: [Vaar; 7] = [
    Vaar::Somvaar,
    Vaar::Mangalvaar,
    Vaar::Budhvaar,
    Vaar::Guruvaar,
    Vaar::Shukravaar,
    Vaar::Shanivaar,
    Vaar::Ravivaar,
];

impl Vaar {
    pub fn from_weekday(weekday: Weekday) -> Self {
        ALL_VAARS[weekday.num_days_from_monday() as usize]
    }

    /// Weekday of a civil date.
    pub fn of_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    /// 0 for Monday through 6 for Sunday.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn lord(self) -> Graha {
        VAAR_LORDS[self.index()]
    }

    pub const fn rahu_kaal_eighth(self) -> u8 {
        RAHU_KAAL_EIGHTH[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighth_table_is_a_permutation_of_two_to_eight() {
        let mut seen = RAHU_KAAL_EIGHTH;
        seen.sort_unstable();
        assert_eq!(seen, [2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(RAHU_KAAL_EIGHTH.iter().map(|&v| u32::from(v)).sum::<u32>(), 35);
    }

    #[test]
    fn monday_is_ruled_by_moon() {
        assert_eq!(Vaar::from_weekday(Weekday::Mon).lord(), Graha::Chandra);
        assert_eq!(Vaar::from_weekday(Weekday::Sun).lord(), Graha::Surya);
    }

    #[test]
    fn wednesday_rahu_is_fifth_eighth() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(Vaar::of_date(date), Vaar::Budhvaar);
        assert_eq!(Vaar::Budhvaar.rahu_kaal_eighth(), 5);
    }
}
