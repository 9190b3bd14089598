// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::ReportRow;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const MAX_COL_WIDTH: usize = 60;

/// Styled sheet: frozen header row, banded rows, typed cells, auto widths.
pub(crate) fn export_xlsx<T: ReportRow>(rows: &[T], path: &Path, sheet_name: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(xlsx_error)?;

    let headers = T::headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2E7D32))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    let bands = [Color::RGB(0xE8F5E9), Color::RGB(0xFFFFFF)];

    for (idx, item) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        let band = bands[idx % 2];

        for (col, value) in item.cells().iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(value.width());
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(MAX_COL_WIDTH) as f64 + 2.0)
            .map_err(xlsx_error)?;
    }

    workbook.save(path).map_err(xlsx_error)?;

    notify_export_success("XLSX", rows.len(), path);
    Ok(())
}

/// Dates become Excel serials, numbers stay numbers, the rest is text.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        ws.write_with_format(row, col, serial, &base.set_num_format(num_format))
            .map_err(xlsx_error)?;
        return Ok(());
    }

    // phone numbers keep their leading '+'
    if !s.starts_with('+')
        && let Ok(num) = s.parse::<f64>()
        && num.is_finite()
    {
        ws.write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
            .map_err(xlsx_error)?;
        return Ok(());
    }

    ws.write_with_format(row, col, s, &base).map_err(xlsx_error)?;
    Ok(())
}

fn xlsx_error(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::Export(format!("XLSX error: {e}"))
}
