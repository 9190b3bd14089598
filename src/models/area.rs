use serde::Serialize;

/// Detections bucketed under one heuristic area key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSummary {
    pub area: String,
    pub count: usize,
    pub latest_detection: String,
    pub average_confidence: f64,
}
