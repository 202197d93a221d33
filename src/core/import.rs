//! CSV seeding of employees and pay statements.
//!
//! Each file is imported inside one transaction: a bad row aborts the whole
//! file and reports its line number.

use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{employees, pay_statements};
use crate::errors::{AppError, AppResult};
use crate::models::employee::NewEmployee;
use crate::models::employee_status::EmployeeStatus;
use crate::models::pay_statement::NewPayStatement;
use crate::utils::date::parse_date;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct EmployeeRecord {
    first_name: String,
    last_name: String,
    ssn: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    hire_date: String,
    job_title: String,
    division: String,
    salary: f64,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PayRecord {
    employee_id: i64,
    period_start: String,
    period_end: String,
    gross_pay: f64,
    #[serde(default)]
    deductions: Option<f64>,
    #[serde(default)]
    net_pay: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub warnings: Vec<String>,
}

fn import_err(line: u64, message: impl Into<String>) -> AppError {
    AppError::Import {
        line,
        message: message.into(),
    }
}

fn open_reader(path: &Path) -> AppResult<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::from(std::io::Error::other(format!("CSV open error: {e}"))))
}

/// Line a CSV error points at, 0 when the reader cannot tell.
fn error_line(e: &csv::Error) -> u64 {
    e.position().map_or(0, |p| p.line())
}

/// Deserialize each data row and hand it to `f` with the line it starts on.
/// Quoted fields may span lines, so the line comes from the reader position.
fn each_row<T, F>(rdr: &mut csv::Reader<File>, mut f: F) -> AppResult<()>
where
    T: DeserializeOwned,
    F: FnMut(u64, T) -> AppResult<()>,
{
    let headers = rdr
        .headers()
        .map_err(|e| import_err(1, e.to_string()))?
        .clone();

    for row in rdr.records() {
        let record = row.map_err(|e| import_err(error_line(&e), e.to_string()))?;
        let line = record.position().map_or(0, |p| p.line());
        let rec = record
            .deserialize(Some(&headers))
            .map_err(|e| import_err(line, e.to_string()))?;
        f(line, rec)?;
    }

    Ok(())
}

impl EmployeeRecord {
    fn into_new_employee(self, line: u64) -> AppResult<NewEmployee> {
        let hire_date = parse_date(&self.hire_date)
            .ok_or_else(|| import_err(line, format!("invalid hire_date '{}'", self.hire_date)))?;

        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            None => EmployeeStatus::Active,
            Some(s) => EmployeeStatus::from_input(s)
                .ok_or_else(|| import_err(line, format!("invalid status '{}'", s)))?,
        };

        let emp = NewEmployee {
            first_name: self.first_name,
            last_name: self.last_name,
            ssn: self.ssn,
            email: self.email,
            phone: self.phone.filter(|p| !p.is_empty()),
            hire_date,
            job_title: self.job_title,
            division: self.division,
            salary: self.salary,
            status,
        };

        emp.validate().map_err(|e| import_err(line, e.to_string()))?;
        Ok(emp)
    }
}

impl PayRecord {
    fn into_new_statement(self, line: u64, warnings: &mut Vec<String>) -> AppResult<NewPayStatement> {
        let period_start = parse_date(&self.period_start).ok_or_else(|| {
            import_err(line, format!("invalid period_start '{}'", self.period_start))
        })?;
        let period_end = parse_date(&self.period_end)
            .ok_or_else(|| import_err(line, format!("invalid period_end '{}'", self.period_end)))?;

        if period_start > period_end {
            return Err(import_err(
                line,
                format!("period_start {} is after period_end {}", period_start, period_end),
            ));
        }

        let deductions = self.deductions.unwrap_or(0.0);
        if self.gross_pay < 0.0 || deductions < 0.0 {
            return Err(import_err(line, "gross_pay and deductions must be non-negative"));
        }

        let st = NewPayStatement {
            employee_id: self.employee_id,
            period_start,
            period_end,
            gross_pay: self.gross_pay,
            deductions,
            net_pay: self.net_pay.unwrap_or(self.gross_pay - deductions),
        };

        if st.net_mismatch() {
            warnings.push(format!(
                "line {}: net_pay {:.2} differs from gross - deductions ({:.2})",
                line,
                st.net_pay,
                st.expected_net()
            ));
        }

        Ok(st)
    }
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn employees(pool: &mut DbPool, path: &Path) -> AppResult<ImportSummary> {
        let mut rdr = open_reader(path)?;
        let tx = pool.transaction()?;
        let mut inserted = 0;

        each_row(&mut rdr, |line, rec: EmployeeRecord| {
            let emp = rec.into_new_employee(line)?;
            employees::insert(&tx, &emp).map_err(|e| import_err(line, e.to_string()))?;
            inserted += 1;
            Ok(())
        })?;

        audit(
            &tx,
            "import",
            &path.to_string_lossy(),
            &format!("Imported {} employee(s)", inserted),
        )?;
        tx.commit()?;

        Ok(ImportSummary {
            inserted,
            warnings: Vec::new(),
        })
    }

    pub fn pay_statements(pool: &mut DbPool, path: &Path) -> AppResult<ImportSummary> {
        let mut rdr = open_reader(path)?;
        let tx = pool.transaction()?;
        let mut inserted = 0;
        let mut warnings = Vec::new();

        each_row(&mut rdr, |line, rec: PayRecord| {
            let st = rec.into_new_statement(line, &mut warnings)?;

            if employees::get(&tx, st.employee_id)?.is_none() {
                return Err(import_err(
                    line,
                    format!("employee #{} does not exist", st.employee_id),
                ));
            }

            pay_statements::insert(&tx, &st).map_err(|e| import_err(line, e.to_string()))?;
            inserted += 1;
            Ok(())
        })?;

        audit(
            &tx,
            "import",
            &path.to_string_lossy(),
            &format!("Imported {} pay statement(s)", inserted),
        )?;
        tx.commit()?;

        Ok(ImportSummary { inserted, warnings })
    }
}
