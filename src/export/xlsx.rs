// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::Tabular;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with a styled header, banded rows and auto-sized columns.
pub(crate) fn export_xlsx<T: Tabular>(items: &[T], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if items.is_empty() {
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_export_error)?;
        workbook.save(path).map_err(to_export_error)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    let headers = T::headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, item) in items.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in item.to_row().iter().enumerate() {
            let kind = if T::date_columns().contains(&col) {
                CellKind::Date
            } else if T::numeric_columns().contains(&col) {
                CellKind::Number
            } else {
                CellKind::Text
            };

            write_cell(worksheet, row, col as u16, value, kind, band)?;

            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

#[derive(Clone, Copy)]
enum CellKind {
    Text,
    Number,
    Date,
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    kind: CellKind,
    bg: Color,
) -> AppResult<()> {
    match kind {
        CellKind::Date => {
            if let Some(serial) = excel_serial(s) {
                let fmt = base_format(bg).set_num_format("yyyy-mm-dd");
                worksheet
                    .write_with_format(row, col, serial, &fmt)
                    .map_err(to_export_error)?;
                return Ok(());
            }
        }
        CellKind::Number => {
            if let Ok(num) = s.parse::<f64>() {
                let fmt = base_format(bg)
                    .set_align(FormatAlign::Right)
                    .set_num_format("#,##0.00");
                worksheet
                    .write_with_format(row, col, num, &fmt)
                    .map_err(to_export_error)?;
                return Ok(());
            }
        }
        CellKind::Text => {}
    }

    worksheet
        .write_with_format(row, col, s, &base_format(bg))
        .map_err(to_export_error)?;
    Ok(())
}

/// Days since the Excel epoch (1899-12-30) for a `YYYY-MM-DD` string.
fn excel_serial(s: &str) -> Option<f64> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - epoch).num_days() as f64)
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
