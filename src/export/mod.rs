// src/export/mod.rs

mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
pub mod model;
mod pdf;
mod pdf_export;
pub mod range;
mod xlsx;

pub use logic::ExportLogic;
pub use model::{AreaExport, AssignmentExport, DetectionExport, ReportRow, StaffExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, rows: usize, path: &Path) {
    success(format!("{label} export completed ({rows} rows): {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

/// Which dataset an export writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportKind {
    #[default]
    Detections,
    Staff,
    Areas,
    Assignments,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Detections => "Garbage detections",
            ReportKind::Staff => "Staff roster",
            ReportKind::Areas => "Detections by area",
            ReportKind::Assignments => "Assigned work",
        }
    }
}
