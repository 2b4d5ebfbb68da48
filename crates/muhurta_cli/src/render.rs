//! Text and JSON output.

use std::fmt::Write as _;

use muhurta_feed::Headline;
use muhurta_vedic::IndexCard;
use serde::Serialize;

use crate::context::TithiSnapshot;
use crate::report::{Dashboard, Header, IndexPlan, LocationRecord, SlotRecord};

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn header(h: &Header) -> String {
    let mut out = format!(
        "Market timing: {}\nDay Lord: {} | Tithi: {} | Zone: {}\n",
        h.date, h.day_lord, h.tithi, h.location
    );
    if let Some(ends) = &h.tithi_ends {
        let _ = writeln!(out, "Tithi ends: {ends} IST");
    }
    if let (Some(rise), Some(set)) = (&h.sunrise, &h.sunset) {
        let _ = writeln!(out, "Sunrise {rise} | Sunset {set}");
    }
    if let Some(rahu) = &h.rahu_kaal {
        let _ = writeln!(out, "Rahu Kaal: {rahu}");
    }
    out
}

pub fn cards(cards: &[IndexCard]) -> String {
    let mut out = format!("{:<14}{:<12}{}\n", "Index", "Best Entry", "Action");
    for c in cards {
        let _ = writeln!(out, "{:<14}{:<12}{}", c.name, c.best_entry, c.action);
    }
    out
}

pub fn schedule(rows: &[SlotRecord]) -> String {
    if rows.is_empty() {
        return "Market Closed\n".to_string();
    }
    let mut out = format!(
        "  {:<22}{:<10}{:<7}{:<7}{}\n",
        "Time (IST)", "Hora", "Rahu?", "Status", "Explanation"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{} {:<22}{:<10}{:<7}{:<7}{}",
            if r.active { '>' } else { ' ' },
            r.time_range,
            r.ruler,
            if r.is_rahu { "YES" } else { "-" },
            r.status,
            r.explanation
        );
    }
    out
}

pub fn planner(plans: &[IndexPlan]) -> String {
    let mut out = String::new();
    for plan in plans {
        let _ = writeln!(out, "== {} ==", plan.name);
        if plan.market_closed {
            out.push_str("Market Closed\n\n");
            continue;
        }
        let _ = writeln!(out, "{:<22}{:<10}{:<18}{}", "Time", "Hora", "Signal", "Action");
        for r in &plan.rows {
            let _ = writeln!(
                out,
                "{:<22}{:<10}{:<18}{}",
                r.time_range, r.ruler, r.signal, r.action
            );
        }
        out.push('\n');
    }
    out
}

pub fn headlines(items: &[Headline]) -> String {
    items
        .iter()
        .map(|h| format!("[{}] {} <{}>\n", h.source, h.title, h.link))
        .collect()
}

pub fn tithi(snapshot: &TithiSnapshot) -> String {
    match snapshot.ends {
        Some(end) => format!(
            "{} (elongation {:.2}°), ends {} IST\n",
            snapshot.info,
            snapshot.info.elongation_deg,
            muhurta_time::to_ist(&end).format("%d %b %Y %I:%M %p")
        ),
        None => format!(
            "{} (elongation {:.2}°)\n",
            snapshot.info, snapshot.info.elongation_deg
        ),
    }
}

pub fn locations(records: &[LocationRecord]) -> String {
    let mut out = format!("  {:<18}{:<22}{:>9}{:>10}\n", "Slug", "Name", "Lat", "Lon");
    for r in records {
        let _ = writeln!(
            out,
            "{} {:<18}{:<22}{:>9.4}{:>10.4}",
            if r.selected { '*' } else { ' ' },
            r.slug,
            r.name,
            r.latitude_deg,
            r.longitude_deg
        );
    }
    out
}

pub fn dashboard(d: &Dashboard) -> String {
    let mut out = header(&d.header);
    out.push('\n');
    out.push_str(&cards(&d.cards));
    if !d.headlines.is_empty() {
        out.push_str("\nHeadlines\n");
        out.push_str(&headlines(&d.headlines));
    }
    out.push_str("\nSchedule\n");
    out.push_str(&schedule(&d.schedule));
    out.push_str("\nPlanner\n");
    out.push_str(&planner(&d.planner));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::location_records;
    use muhurta_vedic::NamedLocation;

    fn row(active: bool, is_rahu: bool) -> SlotRecord {
        SlotRecord {
            time_range: "09:15 AM - 10:00 AM".to_string(),
            ruler: "Jupiter".to_string(),
            is_rahu,
            status: if is_rahu { "RAHU" } else { "OPEN" }.to_string(),
            explanation: "Scalping Zone".to_string(),
            active,
        }
    }

    #[test]
    fn empty_schedule_reads_market_closed() {
        assert_eq!(schedule(&[]), "Market Closed\n");
    }

    #[test]
    fn active_row_is_marked() {
        let text = schedule(&[row(true, false), row(false, true)]);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with('>'));
        assert!(lines[2].starts_with(' '));
        assert!(lines[2].contains("YES"));
    }

    #[test]
    fn closed_planner_tab() {
        let plan = IndexPlan {
            name: "NIFTY 50".to_string(),
            market_closed: true,
            rows: Vec::new(),
        };
        assert!(planner(&[plan]).contains("Market Closed"));
    }

    #[test]
    fn locations_mark_default() {
        let text = locations(&location_records(NamedLocation::Guwahati));
        let marked: Vec<&str> = text.lines().filter(|l| l.starts_with('*')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("guwahati"));
    }

    #[test]
    fn json_is_pretty() {
        let out = json(&row(false, false)).unwrap();
        assert!(out.contains("\n  \"ruler\": \"Jupiter\""));
    }
}
