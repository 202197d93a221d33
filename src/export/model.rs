// src/export/model.rs

use crate::core::report::PayReport;
use crate::models::employee::Employee;
use serde::Serialize;

/// Flat rows that can be written to any export format.
pub(crate) trait Tabular: Serialize {
    fn headers() -> Vec<&'static str>;
    fn to_row(&self) -> Vec<String>;

    /// Columns written as numbers in spreadsheets.
    fn numeric_columns() -> &'static [usize] {
        &[]
    }

    /// Columns holding `YYYY-MM-DD` dates.
    fn date_columns() -> &'static [usize] {
        &[]
    }
}

/// One exported report line.
#[derive(Serialize, Clone, Debug)]
pub struct ReportExport {
    pub month: String,
    pub group_by: String,
    pub key: String,
    pub total_pay: f64,
    pub employee_count: i64,
    pub average_pay: i64,
}

impl ReportExport {
    pub fn from_report(report: &PayReport) -> Vec<Self> {
        report
            .groups
            .iter()
            .map(|g| Self {
                month: report.month.to_string(),
                group_by: report.group_by.column().to_string(),
                key: g.key.clone(),
                total_pay: g.total_pay,
                employee_count: g.employee_count,
                average_pay: g.average(),
            })
            .collect()
    }
}

impl Tabular for ReportExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "month",
            "group_by",
            "key",
            "total_pay",
            "employee_count",
            "average_pay",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.group_by.clone(),
            self.key.clone(),
            format!("{:.2}", self.total_pay),
            self.employee_count.to_string(),
            self.average_pay.to_string(),
        ]
    }

    fn numeric_columns() -> &'static [usize] {
        &[3, 4, 5]
    }
}

/// Employee record as exported. The identity number is left out.
#[derive(Serialize, Clone, Debug)]
pub struct EmployeeExport {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: String,
    pub job_title: String,
    pub division: String,
    pub salary: f64,
    pub status: String,
}

impl From<&Employee> for EmployeeExport {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            phone: e.phone.clone().unwrap_or_default(),
            hire_date: e.hire_date_str(),
            job_title: e.job_title.clone(),
            division: e.division.clone(),
            salary: e.salary,
            status: e.status.to_db_str().to_string(),
        }
    }
}

impl Tabular for EmployeeExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "first_name",
            "last_name",
            "email",
            "phone",
            "hire_date",
            "job_title",
            "division",
            "salary",
            "status",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.hire_date.clone(),
            self.job_title.clone(),
            self.division.clone(),
            format!("{:.2}", self.salary),
            self.status.clone(),
        ]
    }

    fn numeric_columns() -> &'static [usize] {
        &[0, 8]
    }

    fn date_columns() -> &'static [usize] {
        &[5]
    }
}
