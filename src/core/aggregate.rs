//! Summary statistics over shaped detection sets.

use crate::core::shaping::{UNKNOWN_ADDRESS, mean};
use crate::models::detection::confidence_percent;
use crate::models::{
    AreaSummary, AssignmentStats, DetectionRecord, DetectionSummary, HeatmapPoint, HeatmapSummary,
    WorkStatus,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

pub const UNKNOWN_AREA: &str = "Unknown Area";

/// Arithmetic mean of the resolved confidences; 0 for an empty set.
pub fn mean_confidence(records: &[DetectionRecord]) -> f64 {
    let scores: Vec<f64> = records.iter().map(|r| r.confidence_score).collect();
    mean(&scores)
}

pub fn summarize(records: &[DetectionRecord]) -> DetectionSummary {
    if records.is_empty() {
        return DetectionSummary::default();
    }

    let scores = records.iter().map(|r| r.confidence_score);
    DetectionSummary {
        total: records.len(),
        average_confidence: mean_confidence(records),
        max_confidence: scores.clone().fold(f64::MIN, f64::max),
        min_confidence: scores.fold(f64::MAX, f64::min),
    }
}

fn is_numeric(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

fn is_denied(token: &str, denylist: &[String]) -> bool {
    denylist.iter().any(|d| d.trim().eq_ignore_ascii_case(token))
}

/// Heuristic area key from a free-text address.
///
/// First comma-separated token that is longer than two characters, not purely
/// numeric and not a boilerplate region name. Otherwise the first token that is
/// at least not numeric or denylisted, otherwise [`UNKNOWN_AREA`]. Different
/// spellings of one place land in different buckets.
pub fn extract_area(address: &str, denylist: &[String]) -> String {
    let tokens: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let usable = |t: &str| !is_numeric(t) && !is_denied(t, denylist);

    tokens
        .iter()
        .copied()
        .find(|t| t.chars().count() > 2 && usable(t))
        .or_else(|| tokens.iter().copied().find(|t| usable(t)))
        .filter(|t| !t.eq_ignore_ascii_case(UNKNOWN_ADDRESS))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_AREA.to_string())
}

/// Bucket records by [`extract_area`]. Sorted by count desc, then area name.
pub fn group_by_area(records: &[DetectionRecord], denylist: &[String]) -> Vec<AreaSummary> {
    struct Bucket {
        scores: Vec<f64>,
        latest: Option<(DateTime<Utc>, String)>,
        latest_raw: String,
    }

    let mut buckets: HashMap<String, Bucket> = HashMap::new();

    for r in records {
        let area = extract_area(&r.address, denylist);
        let b = buckets.entry(area).or_insert_with(|| Bucket {
            scores: Vec::new(),
            latest: None,
            latest_raw: String::new(),
        });

        b.scores.push(r.confidence_score);

        match r.parsed_timestamp() {
            Some(ts) => {
                if b.latest.as_ref().is_none_or(|(cur, _)| ts > *cur) {
                    b.latest = Some((ts, r.timestamp.clone()));
                }
            }
            // unparseable stamps only count while nothing better is known
            None if b.latest.is_none() && r.timestamp > b.latest_raw => {
                b.latest_raw = r.timestamp.clone();
            }
            None => {}
        }
    }

    let mut out: Vec<AreaSummary> = buckets
        .into_iter()
        .map(|(area, b)| AreaSummary {
            area,
            count: b.scores.len(),
            latest_detection: b.latest.map(|(_, raw)| raw).unwrap_or(b.latest_raw),
            average_confidence: mean(&b.scores),
        })
        .collect();

    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.area.cmp(&b.area)));
    out
}

/// Independent tallies over one detection set. A missing work status counts
/// as pending.
pub fn assignment_stats(records: &[DetectionRecord]) -> AssignmentStats {
    let mut stats = AssignmentStats::default();
    let mut staff: HashSet<&str> = HashSet::new();

    for r in records {
        let Some(staff_id) = r.staff_id.as_deref() else {
            stats.unassigned_detections += 1;
            continue;
        };

        stats.total_assignments += 1;
        staff.insert(staff_id);

        match r.status_or_pending() {
            WorkStatus::Pending => stats.pending_assignments += 1,
            WorkStatus::InProgress => stats.in_progress_assignments += 1,
            WorkStatus::Completed => stats.completed_assignments += 1,
            WorkStatus::Cancelled => stats.cancelled_assignments += 1,
        }
    }

    stats.staff_with_work = staff.len();
    stats
}

/// Map points for every record with coordinates. (0, 0) means "no location".
pub fn heatmap_points(records: &[DetectionRecord]) -> Vec<HeatmapPoint> {
    records
        .iter()
        .filter(|r| r.has_location())
        .map(|r| HeatmapPoint {
            lat: r.latitude,
            lng: r.longitude,
            intensity: confidence_percent(r.confidence_score),
            address: r.address.clone(),
            timestamp: r.timestamp.clone(),
        })
        .collect()
}

pub fn heatmap_summary(points: &[HeatmapPoint], now: DateTime<Utc>) -> HeatmapSummary {
    let intensities: Vec<f64> = points.iter().map(|p| p.intensity).collect();

    HeatmapSummary {
        total_data_points: points.len(),
        average_intensity: mean(&intensities),
        max_intensity: intensities.iter().copied().fold(0.0, f64::max),
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_AREA_DENYLIST;

    fn denylist() -> Vec<String> {
        DEFAULT_AREA_DENYLIST.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn area_skips_short_and_numeric_tokens() {
        assert_eq!(extract_area("12, BT Road, Kolkata", &denylist()), "BT Road");
        assert_eq!(extract_area("  , Sodepur ", &denylist()), "Sodepur");
    }

    #[test]
    fn area_falls_back_to_short_token() {
        assert_eq!(extract_area("AB, 700114, India", &denylist()), "AB");
    }

    #[test]
    fn area_denylist_is_case_insensitive() {
        assert_eq!(extract_area("west bengal, INDIA", &denylist()), UNKNOWN_AREA);
    }

    #[test]
    fn area_of_placeholder_address_is_unknown() {
        assert_eq!(extract_area("Unknown Address", &denylist()), UNKNOWN_AREA);
        assert_eq!(extract_area("", &denylist()), UNKNOWN_AREA);
    }

    #[test]
    fn heatmap_summary_of_nothing_is_zero() {
        let s = heatmap_summary(&[], Utc::now());
        assert_eq!(s.total_data_points, 0);
        assert_eq!(s.average_intensity, 0.0);
        assert_eq!(s.max_intensity, 0.0);
    }
}
