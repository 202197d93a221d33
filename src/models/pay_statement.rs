use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PayStatement {
    pub id: i64,
    pub employee_id: i64,        // ⇔ pay_statements.employee_id (FK, ON DELETE CASCADE)
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewPayStatement {
    pub employee_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
}

impl NewPayStatement {
    /// Net pay the statement should carry given gross and deductions.
    pub fn expected_net(&self) -> f64 {
        self.gross_pay - self.deductions
    }

    /// True when `net_pay` differs from `gross - deductions` by more than a cent.
    pub fn net_mismatch(&self) -> bool {
        (self.expected_net() - self.net_pay).abs() > 0.005
    }
}

/// A statement joined with the owning employee's grouping fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PayRow {
    pub statement_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub job_title: String,
    pub division: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_pay: f64,
}
