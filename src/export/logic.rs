// src/export/logic.rs

use crate::core::directory::{DirectoryLogic, ListFilter};
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EmployeeExport, ReportExport, Tabular};
use crate::export::xlsx::export_xlsx;
use crate::models::pay_group::{GroupBy, Month};
use crate::ui::messages::warning;
use crate::utils::path::{expand_tilde, is_absolute};
use std::path::{Path, PathBuf};

/// High-level export of reports and employee lists.
pub struct ExportLogic;

fn check_target(file: &str, force: bool) -> AppResult<PathBuf> {
    if !is_absolute(file) {
        return Err(AppError::Export(format!(
            "Output file path must be absolute: {file}"
        )));
    }

    let path = expand_tilde(file);
    ensure_writable(&path, force)?;
    Ok(path)
}

fn write<T: Tabular>(items: &[T], format: ExportFormat, path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(items, path),
        ExportFormat::Json => export_json(items, path),
        ExportFormat::Xlsx => export_xlsx(items, path),
    }
}

impl ExportLogic {
    /// Export the grouped pay report of `month`. Returns the number of groups written.
    pub fn report(
        pool: &mut DbPool,
        month: Month,
        group_by: GroupBy,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = check_target(file, force)?;

        let report = ReportLogic::build(pool, month, group_by)?;
        if report.is_empty() {
            warning(format!("No pay data for {}, nothing exported.", month));
            return Ok(0);
        }

        let rows = ReportExport::from_report(&report);
        write(&rows, format, &path)?;
        Ok(rows.len())
    }

    /// Export the employee directory. Returns the number of employees written.
    pub fn employees(
        pool: &mut DbPool,
        filter: &ListFilter,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = check_target(file, force)?;

        let employees = DirectoryLogic::list(pool, filter)?;
        if employees.is_empty() {
            warning("No employees found, nothing exported.");
            return Ok(0);
        }

        let rows: Vec<EmployeeExport> = employees.iter().map(EmployeeExport::from).collect();
        write(&rows, format, &path)?;
        Ok(rows.len())
    }
}
