//! NAIF leapseconds kernel (LSK) parsing.
//!
//! Only the `DELTET/*` assignments inside `\begindata` blocks are read.
//! Values may use Fortran `D` exponents; leap second epochs are `@YYYY-MON-D`
//! date literals, interpreted as UTC midnight.

use std::collections::HashMap;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, jd_to_j2000_seconds, month_from_abbrev};

/// Leap second table and TDB model constants through 2017-JAN-1 (naif0012).
pub const BUILTIN_LSK: &str = r"
\begindata

DELTET/DELTA_T_A       =   32.184
DELTET/K               =    1.657D-3
DELTET/EB              =    1.671D-2
DELTET/M               = (  6.239996D0   1.99096871D-7 )

DELTET/DELTA_AT        = ( 10,   @1972-JAN-1
                           11,   @1972-JUL-1
                           12,   @1973-JAN-1
                           13,   @1974-JAN-1
                           14,   @1975-JAN-1
                           15,   @1976-JAN-1
                           16,   @1977-JAN-1
                           17,   @1978-JAN-1
                           18,   @1979-JAN-1
                           19,   @1980-JAN-1
                           20,   @1981-JUL-1
                           21,   @1982-JUL-1
                           22,   @1983-JUL-1
                           23,   @1985-JUL-1
                           24,   @1988-JAN-1
                           25,   @1990-JAN-1
                           26,   @1991-JAN-1
                           27,   @1992-JUL-1
                           28,   @1993-JUL-1
                           29,   @1994-JUL-1
                           30,   @1996-JAN-1
                           31,   @1997-JUL-1
                           32,   @1999-JAN-1
                           33,   @2006-JAN-1
                           34,   @2009-JAN-1
                           35,   @2012-JUL-1
                           36,   @2015-JUL-1
                           37,   @2017-JAN-1 )

\begintext
";

/// Constants extracted from an LSK.
#[derive(Debug, Clone, PartialEq)]
pub struct LskData {
    /// TT − TAI in seconds.
    pub delta_t_a: f64,
    /// Amplitude of the TDB − TT periodic term, seconds.
    pub k: f64,
    /// Eccentricity of the Earth-Moon barycenter orbit.
    pub eb: f64,
    /// Mean anomaly at J2000, radians.
    pub m0: f64,
    /// Mean anomaly rate, radians per second.
    pub m1: f64,
    /// `(ΔAT seconds, UTC seconds past J2000 when it takes effect)`, ascending.
    pub leap_seconds: Vec<(f64, f64)>,
}

impl LskData {
    /// TAI − UTC in effect at `utc_s` (UTC seconds past J2000).
    ///
    /// Before the first table entry the first value is used.
    pub fn delta_at(&self, utc_s: f64) -> f64 {
        self.leap_seconds
            .iter()
            .take_while(|(_, epoch)| *epoch <= utc_s)
            .last()
            .or(self.leap_seconds.first())
            .map_or(0.0, |(delta, _)| *delta)
    }
}

/// Parse LSK text.
pub fn parse_lsk(content: &str) -> Result<LskData, TimeError> {
    let pool = assignments(content)?;
    let var = |name: &str| lookup(&pool, name);

    let delta_t_a = var("DELTET/DELTA_T_A")?[0];
    let k = var("DELTET/K")?[0];
    let eb = var("DELTET/EB")?[0];
    let [m0, m1] = var("DELTET/M")? else {
        return Err(TimeError::LskParse("DELTET/M needs 2 values".into()));
    };
    let (m0, m1) = (*m0, *m1);

    let flat = var("DELTET/DELTA_AT")?;
    if flat.len() % 2 != 0 {
        return Err(TimeError::LskParse(
            "DELTET/DELTA_AT must hold (delta, epoch) pairs".into(),
        ));
    }
    let leap_seconds: Vec<(f64, f64)> = flat.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    if leap_seconds.windows(2).any(|w| w[1].1 <= w[0].1) {
        return Err(TimeError::LskParse(
            "DELTET/DELTA_AT epochs must increase".into(),
        ));
    }

    Ok(LskData {
        delta_t_a,
        k,
        eb,
        m0,
        m1,
        leap_seconds,
    })
}

fn lookup<'a>(pool: &'a HashMap<String, Vec<f64>>, name: &str) -> Result<&'a [f64], TimeError> {
    pool.get(name)
        .map(Vec::as_slice)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TimeError::LskParse(format!("missing {name}")))
}

/// Collect `NAME = value` and `NAME = ( values )` assignments from all data blocks.
fn assignments(content: &str) -> Result<HashMap<String, Vec<f64>>, TimeError> {
    let mut data = String::new();
    let mut in_data = false;
    for line in content.lines() {
        match line.trim() {
            l if l.eq_ignore_ascii_case("\\begindata") => in_data = true,
            l if l.eq_ignore_ascii_case("\\begintext") => in_data = false,
            l if in_data => {
                data.push_str(l);
                data.push(' ');
            }
            _ => {}
        }
    }
    if data.trim().is_empty() {
        return Err(TimeError::LskParse("no \\begindata section found".into()));
    }

    // Pad delimiters so the stream splits cleanly on whitespace.
    let spaced = data
        .replace('=', " = ")
        .replace('(', " ( ")
        .replace(')', " ) ")
        .replace(',', " ");
    let mut tokens = spaced.split_whitespace().peekable();
    let mut out = HashMap::new();

    while let Some(name) = tokens.next() {
        if tokens.next() != Some("=") {
            return Err(TimeError::LskParse(format!("expected '=' after {name}")));
        }
        let mut values = Vec::new();
        if tokens.peek() == Some(&"(") {
            tokens.next();
            loop {
                match tokens.next() {
                    Some(")") => break,
                    Some(tok) => values.push(parse_value(tok)?),
                    None => {
                        return Err(TimeError::LskParse(format!("unterminated array for {name}")));
                    }
                }
            }
        } else {
            let tok = tokens
                .next()
                .ok_or_else(|| TimeError::LskParse(format!("{name} has no value")))?;
            values.push(parse_value(tok)?);
        }
        out.insert(name.to_string(), values);
    }

    Ok(out)
}

fn parse_value(token: &str) -> Result<f64, TimeError> {
    if let Some(date) = token.strip_prefix('@') {
        return parse_date_literal(date);
    }
    token
        .replace(['D', 'd'], "E")
        .parse()
        .map_err(|e| TimeError::LskParse(format!("bad number '{token}': {e}")))
}

/// `YYYY-MON-D` as seconds past J2000 on the same (UTC) scale.
fn parse_date_literal(text: &str) -> Result<f64, TimeError> {
    let bad = || TimeError::LskParse(format!("bad date literal @{text}"));
    let mut parts = text.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };
    let year: i32 = y.parse().map_err(|_| bad())?;
    let month = month_from_abbrev(m).ok_or_else(bad)?;
    let day: f64 = d.parse().map_err(|_| bad())?;
    Ok(jd_to_j2000_seconds(calendar_to_jd(year, month, day)))
}
