// src/export/excel_date.rs

use crate::utils::date::parse_timestamp;
use chrono::{NaiveDate, NaiveDateTime};

/// Excel serial number and number format for a date or timestamp cell.
/// Timestamps are written in UTC.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let s = s.trim();

    // bare dates keep a date-only format
    if s.len() == 10 {
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
        return Some(("yyyy-mm-dd", excel_serial(&d.and_hms_opt(0, 0, 0)?)?));
    }

    // plain numbers must not be read as dates
    if !s.contains('-') {
        return None;
    }

    let dt = parse_timestamp(s)?.naive_utc();
    Some(("yyyy-mm-dd hh:mm", excel_serial(&dt)?))
}

fn excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let secs = (*dt - epoch).num_seconds() as f64;
    Some(secs / 86_400.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_and_timestamps_become_serials() {
        assert_eq!(parse_to_excel_date("1900-01-01"), Some(("yyyy-mm-dd", 2.0)));

        let (fmt, serial) = parse_to_excel_date("2025-01-01T12:00:00Z").unwrap();
        assert_eq!(fmt, "yyyy-mm-dd hh:mm");
        assert!((serial - 45658.5).abs() < 1e-9);
    }

    #[test]
    fn numbers_and_text_are_left_alone() {
        assert_eq!(parse_to_excel_date("4.5"), None);
        assert_eq!(parse_to_excel_date("Sodepur"), None);
    }
}
