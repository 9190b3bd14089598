//! Domain logic: document shaping, aggregation and the services the CLI calls.

pub mod aggregate;
pub mod assignment;
pub mod backup;
pub mod config;
pub mod dashboard;
pub mod detection;
pub mod log;
pub mod refresh;
pub mod shaping;
pub mod staff;

pub use assignment::AssignmentService;
pub use dashboard::{DashboardLogic, DashboardSnapshot};
pub use detection::DetectionService;
pub use staff::StaffService;
