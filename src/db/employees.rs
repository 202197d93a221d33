//! Typed queries over the `employees` table.

use crate::db::filter::{Filter, where_clause};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeePatch, NewEmployee};
use crate::models::employee_status::EmployeeStatus;
use chrono::NaiveDate;
use clap::ValueEnum;
use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params, params_from_iter};

const SELECT_EMPLOYEES: &str = "SELECT e.id, e.first_name, e.last_name, e.ssn, e.email, e.phone, \
     e.hire_date, e.job_title, e.division, e.salary, e.status, e.created_at, e.updated_at \
     FROM employees e";

/// Sort order for employee listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmployeeSort {
    /// Last name, then first name
    #[default]
    Name,
    /// Highest salary first
    Salary,
    /// Earliest hire first
    Hired,
    Id,
}

impl EmployeeSort {
    const fn sql_clause(self) -> &'static str {
        match self {
            Self::Name => " ORDER BY e.last_name ASC, e.first_name ASC, e.id ASC",
            Self::Salary => " ORDER BY e.salary DESC, e.id ASC",
            Self::Hired => " ORDER BY e.hire_date ASC, e.id ASC",
            Self::Id => " ORDER BY e.id ASC",
        }
    }
}

pub fn map_row(row: &Row) -> rusqlite::Result<Employee> {
    let hire_str: String = row.get("hire_date")?;
    let hire_date = NaiveDate::parse_from_str(&hire_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(hire_str.clone())),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = EmployeeStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        ssn: row.get("ssn")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        hire_date,
        job_title: row.get("job_title")?,
        division: row.get("division")?,
        salary: row.get("salary")?,
        status,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Select employees matching every filter, in the given order.
pub fn select(conn: &Connection, filters: &[Filter], sort: EmployeeSort) -> AppResult<Vec<Employee>> {
    let (where_sql, values) = where_clause(filters);
    let sql = format!("{SELECT_EMPLOYEES}{where_sql}{}", sort.sql_clause());

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let sql = format!("{SELECT_EMPLOYEES} WHERE e.id = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert(conn: &Connection, emp: &NewEmployee) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (first_name, last_name, ssn, email, phone, hire_date,
                                job_title, division, salary, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            emp.first_name.trim(),
            emp.last_name.trim(),
            emp.ssn.trim(),
            emp.email.trim(),
            emp.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            emp.hire_date.format("%Y-%m-%d").to_string(),
            emp.job_title.trim(),
            emp.division.trim(),
            emp.salary,
            emp.status.to_db_str(),
        ],
    )
    .map_err(|e| unique_violation(e, emp.ssn.trim(), emp.email.trim()))?;

    Ok(conn.last_insert_rowid())
}

/// Apply a partial update. Returns the number of rows touched (0 or 1).
pub fn update(conn: &Connection, id: i64, patch: &EmployeePatch) -> AppResult<usize> {
    let mut sets: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    let mut set = |col: &str, v: Value| {
        values.push(v);
        sets.push(format!("{col} = ?{}", values.len()));
    };

    if let Some(v) = &patch.first_name {
        set("first_name", Value::Text(v.trim().to_string()));
    }
    if let Some(v) = &patch.last_name {
        set("last_name", Value::Text(v.trim().to_string()));
    }
    if let Some(v) = &patch.ssn {
        set("ssn", Value::Text(v.trim().to_string()));
    }
    if let Some(v) = &patch.email {
        set("email", Value::Text(v.trim().to_string()));
    }
    if let Some(v) = &patch.phone {
        // empty string clears the phone number
        let phone = v.trim();
        if phone.is_empty() {
            set("phone", Value::Null);
        } else {
            set("phone", Value::Text(phone.to_string()));
        }
    }
    if let Some(v) = patch.hire_date {
        set("hire_date", Value::Text(v.format("%Y-%m-%d").to_string()));
    }
    if let Some(v) = &patch.job_title {
        set("job_title", Value::Text(v.trim().to_string()));
    }
    if let Some(v) = &patch.division {
        set("division", Value::Text(v.trim().to_string()));
    }
    if let Some(v) = patch.salary {
        set("salary", Value::Real(v));
    }
    if let Some(v) = patch.status {
        set("status", Value::Text(v.to_db_str().to_string()));
    }

    if sets.is_empty() {
        return Err(AppError::EmptyPatch);
    }

    values.push(Value::Integer(id));
    let sql = format!(
        "UPDATE employees SET {} WHERE id = ?{}",
        sets.join(", "),
        values.len()
    );

    let ssn = patch.ssn.as_deref().unwrap_or_default().trim().to_string();
    let email = patch.email.as_deref().unwrap_or_default().trim().to_string();

    conn.execute(&sql, params_from_iter(values.iter()))
        .map_err(|e| unique_violation(e, &ssn, &email))
}

pub fn set_salary(conn: &Connection, id: i64, salary: f64) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached("UPDATE employees SET salary = ?1 WHERE id = ?2")?;
    Ok(stmt.execute(params![salary, id])?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM employees WHERE id = ?1", [id])?)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?)
}

/// Translate a UNIQUE constraint failure into a domain error naming the field.
fn unique_violation(e: rusqlite::Error, ssn: &str, email: &str) -> AppError {
    if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        let msg = e.to_string();
        if msg.contains("employees.ssn") {
            return AppError::DuplicateEmployee {
                field: "ssn".to_string(),
                value: ssn.to_string(),
            };
        }
        if msg.contains("employees.email") {
            return AppError::DuplicateEmployee {
                field: "email".to_string(),
                value: email.to_string(),
            };
        }
    }
    AppError::Db(e)
}
