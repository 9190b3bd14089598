pub mod area;
pub mod assignment;
pub mod detection;
pub mod heatmap;
pub mod staff;

pub use area::AreaSummary;
pub use assignment::{AssignedWork, AssignmentStats, WorkStatus};
pub use detection::{DetectionBatch, DetectionRecord, DetectionSummary};
pub use heatmap::{HeatmapPoint, HeatmapSummary};
pub use staff::{StaffFilter, StaffInput, StaffMember, StaffSortKey, StaffStats, StaffStatus, StaffWorkload, SortOrder};
