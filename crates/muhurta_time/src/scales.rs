//! UTC → TAI → TT → TDB chain and its inverse.
//!
//! All values are seconds past J2000 in their own scale. TDB − TT uses the
//! single periodic term of the NAIF model:
//! `TDB − TT = K sin(E)`, `E = M + EB sin(M)`, `M = M0 + M1 · t`.

use crate::lsk::LskData;

/// TDB − TT at a TT (or TDB, the difference is negligible) epoch.
pub fn tdb_minus_tt(t_s: f64, lsk: &LskData) -> f64 {
    let m = lsk.m0 + lsk.m1 * t_s;
    let e = m + lsk.eb * m.sin();
    lsk.k * e.sin()
}

pub fn utc_to_tai(utc_s: f64, lsk: &LskData) -> f64 {
    utc_s + lsk.delta_at(utc_s)
}

pub fn tai_to_utc(tai_s: f64, lsk: &LskData) -> f64 {
    // ΔAT is indexed by UTC; step back once, then settle on the entry in effect.
    let first_guess = tai_s - lsk.delta_at(tai_s);
    tai_s - lsk.delta_at(first_guess)
}

pub fn utc_to_tt(utc_s: f64, lsk: &LskData) -> f64 {
    utc_to_tai(utc_s, lsk) + lsk.delta_t_a
}

pub fn tt_to_tdb(tt_s: f64, lsk: &LskData) -> f64 {
    tt_s + tdb_minus_tt(tt_s, lsk)
}

pub fn tdb_to_tt(tdb_s: f64, lsk: &LskData) -> f64 {
    let mut tt = tdb_s;
    for _ in 0..3 {
        tt = tdb_s - tdb_minus_tt(tt, lsk);
    }
    tt
}

pub fn utc_to_tdb(utc_s: f64, lsk: &LskData) -> f64 {
    tt_to_tdb(utc_to_tt(utc_s, lsk), lsk)
}

pub fn tdb_to_utc(tdb_s: f64, lsk: &LskData) -> f64 {
    tai_to_utc(tdb_to_tt(tdb_s, lsk) - lsk.delta_t_a, lsk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsk::{BUILTIN_LSK, parse_lsk};

    fn lsk() -> LskData {
        parse_lsk(BUILTIN_LSK).unwrap()
    }

    #[test]
    fn tt_minus_utc_in_2024() {
        let lsk = lsk();
        let utc = 24.0 * 365.25 * 86_400.0;
        // One ulp at 7.6e8 s is about 1.2e-7 s.
        let offset = utc_to_tt(utc, &lsk) - utc;
        assert!((offset - 69.184).abs() < 1e-6, "TT-UTC {offset}");
    }

    #[test]
    fn tdb_tt_periodic_term_is_bounded() {
        let lsk = lsk();
        for day in (0..800).step_by(7) {
            let d = tdb_minus_tt(day as f64 * 86_400.0, &lsk);
            assert!(d.abs() <= 1.7e-3, "TDB-TT {d} s on day {day}");
        }
    }

    #[test]
    fn utc_tdb_round_trip_across_leap_second() {
        let lsk = lsk();
        // 2017-01-01 00:00 UTC and one second either side
        let leap = (2_457_754.5 - 2_451_545.0) * 86_400.0;
        for utc in [leap - 1.0, leap, leap + 1.0, 0.0, 7.5e8] {
            let back = tdb_to_utc(utc_to_tdb(utc, &lsk), &lsk);
            assert!((back - utc).abs() < 1e-6, "{utc} -> {back}");
        }
    }
}
