use chrono::{DateTime, Utc};
use serde::Serialize;

/// Upper bound of [`HeatmapPoint::intensity`].
pub const MAX_INTENSITY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    /// Detection confidence on a 0–100 scale.
    pub intensity: f64,
    pub address: String,
    pub timestamp: String,
}

impl HeatmapPoint {
    /// Weight in 0–1 as map heat layers expect it.
    pub fn normalized(&self) -> f64 {
        self.intensity / MAX_INTENSITY
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapSummary {
    pub total_data_points: usize,
    pub average_intensity: f64,
    pub max_intensity: f64,
    pub last_updated: DateTime<Utc>,
}
