// src/export/logic.rs

use crate::config::Config;
use crate::core::aggregate::group_by_area;
use crate::core::assignment::AssignmentService;
use crate::core::detection::DetectionService;
use crate::core::staff::StaffService;
use crate::db::store::DocumentStore;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{AreaExport, AssignmentExport, DetectionExport, ReportRow, StaffExport};
use crate::export::pdf_export::export_pdf;
use crate::export::range::{DateRange, parse_range};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ReportKind};
use crate::ui::messages::{info, warning};
use std::path::Path;

/// Options of one `export` run.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub report: ReportKind,
    pub format: ExportFormat,
    pub file: &'a str,
    /// `None`, `"all"`, or a period accepted by [`parse_range`].
    pub range: Option<&'a str>,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write one report. The path must be absolute; an existing file needs
    /// confirmation unless `force`. An empty dataset only warns.
    pub fn export(store: &impl DocumentStore, cfg: &Config, req: &ExportRequest) -> AppResult<()> {
        let path = Path::new(req.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                req.file
            )));
        }

        let range: Option<DateRange> = match req.range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let title = build_title(req.report, req.range);

        match req.report {
            ReportKind::Detections => {
                let rows: Vec<DetectionExport> = Self::detections(store, range)?
                    .iter()
                    .map(DetectionExport::from)
                    .collect();
                write_report(&rows, path, req, &title)
            }
            ReportKind::Areas => {
                let records = Self::detections(store, range)?;
                let rows: Vec<AreaExport> = group_by_area(&records, &cfg.area_denylist)
                    .iter()
                    .map(AreaExport::from)
                    .collect();
                write_report(&rows, path, req, &title)
            }
            ReportKind::Staff => {
                if range.is_some() {
                    info("--range does not apply to the staff report, exporting the whole roster.");
                }
                let rows: Vec<StaffExport> = StaffService::list(store, cfg.default_rating)?
                    .iter()
                    .map(StaffExport::from)
                    .collect();
                write_report(&rows, path, req, &title)
            }
            ReportKind::Assignments => {
                let rows: Vec<AssignmentExport> =
                    AssignmentService::staff_with_assigned_work(store, cfg.default_rating)?
                        .iter()
                        .flat_map(|w| {
                            w.assigned_work
                                .iter()
                                .filter(|a| range.is_none_or(|r| r.contains(&a.assigned_at)))
                                .map(|a| AssignmentExport::new(&w.staff, a))
                        })
                        .collect();
                write_report(&rows, path, req, &title)
            }
        }
    }

    fn detections(
        store: &impl DocumentStore,
        range: Option<DateRange>,
    ) -> AppResult<Vec<crate::models::DetectionRecord>> {
        let mut records = DetectionService::fetch_all(store)?.results;
        if let Some(r) = range {
            records.retain(|d| r.contains(&d.timestamp));
        }
        Ok(records)
    }
}

fn write_report<T: ReportRow>(
    rows: &[T],
    path: &Path,
    req: &ExportRequest,
    title: &str,
) -> AppResult<()> {
    if rows.is_empty() {
        warning("No records found for the selected report and range; nothing exported.");
        return Ok(());
    }

    ensure_writable(path, req.force)?;

    match req.format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
        ExportFormat::Xlsx => export_xlsx(rows, path, req.report.title()),
        ExportFormat::Pdf => export_pdf(rows, path, title),
    }
}

/// Report title plus the selected period, e.g. "Garbage detections, June 2025".
fn build_title(report: ReportKind, period: Option<&str>) -> String {
    let base = report.title();

    let Some(p) = period.filter(|p| !p.eq_ignore_ascii_case("all")) else {
        return base.to_string();
    };

    match p.split_once(':') {
        Some((from, to)) => format!("{base}, {from} to {to}"),
        None if p.len() == 7 => {
            let month = p
                .get(5..7)
                .map(crate::utils::date::month_name)
                .unwrap_or_default();
            format!("{base}, {month} {}", &p[..4])
        }
        None => format!("{base}, {p}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_the_period() {
        assert_eq!(build_title(ReportKind::Staff, None), "Staff roster");
        assert_eq!(build_title(ReportKind::Detections, Some("all")), "Garbage detections");
        assert_eq!(
            build_title(ReportKind::Detections, Some("2025-06")),
            "Garbage detections, June 2025"
        );
        assert_eq!(
            build_title(ReportKind::Areas, Some("2025-06-01:2025-06-10")),
            "Detections by area, 2025-06-01 to 2025-06-10"
        );
    }
}
