use super::assignment::AssignedWork;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum StaffStatus {
    Active,
    #[serde(rename = "On Leave")]
    #[value(name = "on-leave", aliases = ["on_leave", "leave"])]
    OnLeave,
    Inactive,
}

impl StaffStatus {
    /// Label as stored in staff documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::Active => "Active",
            StaffStatus::OnLeave => "On Leave",
            StaffStatus::Inactive => "Inactive",
        }
    }

    /// Accepts the stored label plus the usual spelling variants.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "active" => Some(StaffStatus::Active),
            "on leave" | "onleave" | "leave" => Some(StaffStatus::OnLeave),
            "inactive" => Some(StaffStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A waste-collection worker ("safai karmi").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub working_area: String,
    pub status: StaffStatus,
    pub join_date: String,
    pub last_active: String,
    pub total_collections: u64,
    pub rating: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Caller-supplied fields for add / update.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffInput {
    pub name: String,
    pub phone: String,
    pub working_area: String,
    pub status: StaffStatus,
    pub join_date: NaiveDate,
    pub total_collections: u64,
    pub rating: f64,
}

impl StaffMember {
    /// True when every caller-supplied field matches `input`.
    pub fn matches_input(&self, input: &StaffInput) -> bool {
        self.name == input.name
            && self.phone == input.phone
            && self.working_area == input.working_area
            && self.status == input.status
            && self.join_date == input.join_date.format("%Y-%m-%d").to_string()
            && self.total_collections == input.total_collections
            && self.rating == input.rating
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StaffSortKey {
    #[default]
    Name,
    JoinDate,
    TotalCollections,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct StaffFilter {
    /// Case-insensitive match against name, id and working area.
    pub search: Option<String>,
    /// `None` means all statuses.
    pub status: Option<StaffStatus>,
    pub sort_by: StaffSortKey,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    pub total: usize,
    pub active: usize,
    pub on_leave: usize,
    pub inactive: usize,
    pub total_collections: u64,
    pub average_rating: f64,
}

/// A staff member joined with the detections assigned to them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffWorkload {
    pub staff: StaffMember,
    pub assigned_work: Vec<AssignedWork>,
    pub total_assigned: usize,
    pub completed: usize,
    /// Pending plus in progress.
    pub pending: usize,
}
