// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{ReportRow, to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

pub(crate) fn export_pdf<T: ReportRow>(rows: &[T], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = T::headers();
    let table = to_table(rows);

    // wide reports do not fit portrait A4
    let mut pdf = if headers.len() > 6 {
        PdfManager::landscape()
    } else {
        PdfManager::new()
    };
    pdf.write_table(title, headers, &table);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", rows.len(), path);
    Ok(())
}
