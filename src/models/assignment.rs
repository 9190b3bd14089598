use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work-status label stored on an assigned detection.
/// Any value may be written at any time; there is no transition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Pending,
    #[value(name = "in_progress", alias = "in-progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Pending => "pending",
            WorkStatus::InProgress => "in_progress",
            WorkStatus::Completed => "completed",
            WorkStatus::Cancelled => "cancelled",
        }
    }

    /// Strict parse of a stored label.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(WorkStatus::Pending),
            "in_progress" => Some(WorkStatus::InProgress),
            "completed" => Some(WorkStatus::Completed),
            "cancelled" => Some(WorkStatus::Cancelled),
            _ => None,
        }
    }

    /// Pending or in progress.
    pub fn is_open(&self) -> bool {
        matches!(self, WorkStatus::Pending | WorkStatus::InProgress)
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detection as seen from the staff member it is assigned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedWork {
    pub detection_id: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub confidence_score: f64,
    pub assigned_at: String,
    pub status: WorkStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentStats {
    pub total_assignments: usize,
    pub pending_assignments: usize,
    pub in_progress_assignments: usize,
    pub completed_assignments: usize,
    pub cancelled_assignments: usize,
    pub staff_with_work: usize,
    pub unassigned_detections: usize,
}

impl AssignmentStats {
    /// Work still to be done (pending + in progress).
    pub fn open_assignments(&self) -> usize {
        self.pending_assignments + self.in_progress_assignments
    }
}
