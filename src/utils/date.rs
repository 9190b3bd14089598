use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse the timestamp spellings found in stored documents.
///
/// RFC 3339 first; naive date-times and plain dates are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

/// English month name for a two-digit month ("06" -> "June").
pub fn month_name(mm: &str) -> String {
    const NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    mm.parse::<usize>()
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| NAMES.get(i))
        .map(|n| n.to_string())
        .unwrap_or_else(|| mm.to_string())
}

/// Human "time ago" label used by activity listings.
pub fn time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - ts).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{mins} min ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours} h ago");
    }
    format!("{} d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_stored_timestamp_spellings() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T16:00:00+05:30"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T10:30:00.000"), Some(expected));
        assert!(parse_timestamp("2025-03-01").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - chrono::Duration::minutes(15), now), "15 min ago");
        assert_eq!(time_ago(now - chrono::Duration::hours(2), now), "2 h ago");
        assert_eq!(time_ago(now - chrono::Duration::days(3), now), "3 d ago");
    }
}
