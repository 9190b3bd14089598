//! Formatting utilities used for CLI and export outputs.

/// `0.873` → `"87.3%"`; `87.3` → `"87.3%"`.
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", crate::models::detection::confidence_percent(score))
}

/// Cut to `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_both_scales() {
        assert_eq!(format_percent(0.873), "87.3%");
        assert_eq!(format_percent(87.3), "87.3%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdefgh", 6), "abc...");
    }
}
