// src/export/model.rs

use crate::models::{AreaSummary, AssignedWork, DetectionRecord, StaffMember};
use serde::Serialize;

/// A flat, serializable report line. Field order of the struct and
/// [`ReportRow::headers`] must agree so CSV/JSON and XLSX/PDF show the same columns.
pub trait ReportRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

#[derive(Serialize, Clone, Debug)]
pub struct DetectionExport {
    pub id: String,
    pub timestamp: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub confidence: f64,
    pub accuracy: String,
    pub staff_id: String,
    pub work_status: String,
}

impl From<&DetectionRecord> for DetectionExport {
    fn from(r: &DetectionRecord) -> Self {
        Self {
            id: r.id.clone(),
            timestamp: r.timestamp.clone(),
            address: r.address.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
            confidence: r.confidence_score,
            accuracy: r.accuracy.clone(),
            staff_id: r.staff_id.clone().unwrap_or_default(),
            work_status: r.work_status.map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

impl ReportRow for DetectionExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "timestamp",
            "address",
            "latitude",
            "longitude",
            "confidence",
            "accuracy",
            "staff_id",
            "work_status",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.timestamp.clone(),
            self.address.clone(),
            format!("{:.5}", self.latitude),
            format!("{:.5}", self.longitude),
            format!("{:.3}", self.confidence),
            self.accuracy.clone(),
            self.staff_id.clone(),
            self.work_status.clone(),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct StaffExport {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub working_area: String,
    pub status: String,
    pub join_date: String,
    pub last_active: String,
    pub total_collections: u64,
    pub rating: f64,
}

impl From<&StaffMember> for StaffExport {
    fn from(m: &StaffMember) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            phone: m.phone.clone(),
            working_area: m.working_area.clone(),
            status: m.status.to_string(),
            join_date: m.join_date.clone(),
            last_active: m.last_active.clone(),
            total_collections: m.total_collections,
            rating: m.rating,
        }
    }
}

impl ReportRow for StaffExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "phone",
            "working_area",
            "status",
            "join_date",
            "last_active",
            "total_collections",
            "rating",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.phone.clone(),
            self.working_area.clone(),
            self.status.clone(),
            self.join_date.clone(),
            self.last_active.clone(),
            self.total_collections.to_string(),
            format!("{:.1}", self.rating),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct AreaExport {
    pub area: String,
    pub count: usize,
    pub latest_detection: String,
    pub average_confidence: f64,
}

impl From<&AreaSummary> for AreaExport {
    fn from(a: &AreaSummary) -> Self {
        Self {
            area: a.area.clone(),
            count: a.count,
            latest_detection: a.latest_detection.clone(),
            average_confidence: a.average_confidence,
        }
    }
}

impl ReportRow for AreaExport {
    fn headers() -> &'static [&'static str] {
        &["area", "count", "latest_detection", "average_confidence"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.area.clone(),
            self.count.to_string(),
            self.latest_detection.clone(),
            format!("{:.3}", self.average_confidence),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct AssignmentExport {
    pub detection_id: String,
    pub staff_id: String,
    pub staff_name: String,
    pub address: String,
    pub assigned_at: String,
    pub status: String,
    pub confidence: f64,
}

impl AssignmentExport {
    pub fn new(staff: &StaffMember, work: &AssignedWork) -> Self {
        Self {
            detection_id: work.detection_id.clone(),
            staff_id: staff.id.clone(),
            staff_name: staff.name.clone(),
            address: work.address.clone(),
            assigned_at: work.assigned_at.clone(),
            status: work.status.to_string(),
            confidence: work.confidence_score,
        }
    }
}

impl ReportRow for AssignmentExport {
    fn headers() -> &'static [&'static str] {
        &[
            "detection_id",
            "staff_id",
            "staff_name",
            "address",
            "assigned_at",
            "status",
            "confidence",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.detection_id.clone(),
            self.staff_id.clone(),
            self.staff_name.clone(),
            self.address.clone(),
            self.assigned_at.clone(),
            self.status.clone(),
            format!("{:.3}", self.confidence),
        ]
    }
}

pub(crate) fn to_table<T: ReportRow>(rows: &[T]) -> Vec<Vec<String>> {
    rows.iter().map(ReportRow::cells).collect()
}
