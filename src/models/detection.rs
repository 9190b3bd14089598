use super::assignment::WorkStatus;
use crate::utils::date::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A garbage-overflow detection in its normalized read shape.
///
/// Built by `core::shaping::shape_detection` from whatever the detection
/// pipeline stored; every field is defined even when the source document is not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// 0–1 or 0–100 depending on the writer; see [`DetectionRecord::confidence_percent`].
    pub confidence_score: f64,
    pub accuracy: String,
    pub address: String,
    pub timestamp: String,
    pub model_version: Option<String>,
    pub image_url: Option<String>,
    pub staff_id: Option<String>,
    pub work_status: Option<WorkStatus>,
}

impl DetectionRecord {
    pub fn is_assigned(&self) -> bool {
        self.staff_id.is_some()
    }

    /// Missing work status reads as pending.
    pub fn status_or_pending(&self) -> WorkStatus {
        self.work_status.unwrap_or(WorkStatus::Pending)
    }

    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    pub fn confidence_percent(&self) -> f64 {
        confidence_percent(self.confidence_score)
    }

    /// (0, 0) is what the shaping layer produces when no coordinates exist.
    pub fn has_location(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}

/// Confidence on a 0–100 scale. Values up to 1.0 are taken as fractions.
pub fn confidence_percent(score: f64) -> f64 {
    let pct = if score <= 1.0 { score * 100.0 } else { score };
    pct.clamp(0.0, 100.0)
}

/// Result of a detection load, as handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionBatch {
    pub results: Vec<DetectionRecord>,
    pub total_count: usize,
    pub average_confidence: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub total: usize,
    pub average_confidence: f64,
    pub max_confidence: f64,
    pub min_confidence: f64,
}
