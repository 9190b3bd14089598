// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_timestamp;
use chrono::{Datelike, NaiveDate};

/// Inclusive day range selected with `--range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// True when `timestamp` parses and its UTC day falls inside the range.
    pub fn contains(&self, timestamp: &str) -> bool {
        parse_timestamp(timestamp)
            .map(|t| t.date_naive())
            .is_some_and(|d| d >= self.start && d <= self.end)
    }
}

fn bad(what: &str, input: &str) -> AppError {
    AppError::InvalidDate(format!("{what} in range '{input}'"))
}

/// Parse one endpoint into its first and last day.
/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn bounds(part: &str, input: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match part.len() {
        4 => {
            let y: i32 = part.parse().map_err(|_| bad("invalid year", input))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad("invalid year", input))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad("invalid year", input))?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{part}-01"), "%Y-%m-%d")
                .map_err(|_| bad("invalid month", input))?;
            let last = month_last_day(first.year(), first.month())
                .and_then(|d| NaiveDate::from_ymd_opt(first.year(), first.month(), d))
                .ok_or_else(|| bad("invalid month", input))?;
            Ok((first, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(part, "%Y-%m-%d").map_err(|_| bad("invalid date", input))?;
            Ok((d, d))
        }
        _ => Err(bad("unsupported format", input)),
    }
}

/// Parse `--range`.
///
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `start:end` with both sides in the same format
pub fn parse_range(r: &str) -> AppResult<DateRange> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(bad("start and end must have the same format", r));
            }
            (bounds(s, r)?.0, bounds(e, r)?.1)
        }
        None => bounds(r, r)?,
    };

    if start > end {
        return Err(bad("start is after end", r));
    }
    Ok(DateRange { start, end })
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(
            parse_range("2024").unwrap(),
            DateRange { start: d("2024-01-01"), end: d("2024-12-31") }
        );
        assert_eq!(parse_range("2024-02").unwrap().end, d("2024-02-29"));
        assert_eq!(parse_range("2025-06-18").unwrap().start, d("2025-06-18"));
    }

    #[test]
    fn ranges_and_errors() {
        let r = parse_range("2025-06:2025-08").unwrap();
        assert_eq!((r.start, r.end), (d("2025-06-01"), d("2025-08-31")));

        assert!(parse_range("2025:2025-08").is_err());
        assert!(parse_range("2025-13").is_err());
        assert!(parse_range("2025-08:2025-06").is_err());
    }

    #[test]
    fn contains_uses_utc_day() {
        let r = parse_range("2025-06-01").unwrap();
        assert!(r.contains("2025-06-01T23:30:00Z"));
        assert!(r.contains("2025-06-02T01:00:00+05:30"));
        assert!(!r.contains("garbage"));
    }
}
