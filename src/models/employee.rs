use super::employee_status::EmployeeStatus;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,               // ⇔ employees.ssn (UNIQUE)
    pub email: String,             // ⇔ employees.email (UNIQUE)
    pub phone: Option<String>,
    pub hire_date: NaiveDate,      // ⇔ employees.hire_date (TEXT "YYYY-MM-DD")
    pub job_title: String,
    pub division: String,
    pub salary: f64,               // ⇔ employees.salary (REAL, >= 0)
    pub status: EmployeeStatus,    // ⇔ employees.status ('active' | 'inactive')
    pub created_at: String,        // store-assigned
    pub updated_at: String,        // store-assigned, refreshed on every UPDATE
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn hire_date_str(&self) -> String {
        self.hire_date.format("%Y-%m-%d").to_string()
    }
}

/// Fields needed to create an employee. `id` and timestamps come from the store.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: NaiveDate,
    pub job_title: String,
    pub division: String,
    pub salary: f64,
    pub status: EmployeeStatus,
}

impl NewEmployee {
    /// Check every field before the row reaches the store.
    pub fn validate(&self) -> AppResult<()> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("ssn", &self.ssn)?;
        require_text("job_title", &self.job_title)?;
        require_text("division", &self.division)?;
        validate_email(&self.email)?;
        validate_salary(self.salary)?;
        Ok(())
    }
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ssn: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub job_title: Option<String>,
    pub division: Option<String>,
    pub salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.ssn.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.hire_date.is_none()
            && self.job_title.is_none()
            && self.division.is_none()
            && self.salary.is_none()
            && self.status.is_none()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::EmptyPatch);
        }
        if let Some(v) = &self.first_name {
            require_text("first_name", v)?;
        }
        if let Some(v) = &self.last_name {
            require_text("last_name", v)?;
        }
        if let Some(v) = &self.ssn {
            require_text("ssn", v)?;
        }
        if let Some(v) = &self.job_title {
            require_text("job_title", v)?;
        }
        if let Some(v) = &self.division {
            require_text("division", v)?;
        }
        if let Some(v) = &self.email {
            validate_email(v)?;
        }
        if let Some(v) = self.salary {
            validate_salary(v)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidField {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_salary(salary: f64) -> AppResult<()> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(AppError::InvalidSalary(salary.to_string()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern")
    });

    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(AppError::InvalidEmail(email.to_string()))
    }
}
