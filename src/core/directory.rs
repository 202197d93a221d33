use crate::db::employees::{self, EmployeeSort};
use crate::db::filter::{Column, Filter};
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeePatch, NewEmployee};
use crate::models::employee_status::EmployeeStatus;

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<EmployeeStatus>,
    pub division: Option<String>,
    pub job_title: Option<String>,
    pub sort: EmployeeSort,
}

impl ListFilter {
    fn filters(&self) -> Vec<Filter> {
        let mut out = Vec::new();
        if let Some(s) = self.status {
            out.push(Filter::eq(Column::Status, s.to_db_str().to_string()));
        }
        if let Some(d) = &self.division {
            out.push(Filter::eq(Column::Division, d.trim().to_string()));
        }
        if let Some(t) = &self.job_title {
            out.push(Filter::eq(Column::JobTitle, t.trim().to_string()));
        }
        out
    }
}

/// Create / read / update / delete over employee records.
pub struct DirectoryLogic;

impl DirectoryLogic {
    pub fn create(pool: &mut DbPool, emp: NewEmployee) -> AppResult<Employee> {
        emp.validate()?;

        let id = employees::insert(&pool.conn, &emp)?;
        let created = Self::get(pool, id)?;

        audit_or_warn(
            &pool.conn,
            "add",
            &format!("employee #{}", id),
            &format!("Created {} ({})", created.full_name(), created.job_title),
        );

        Ok(created)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Employee> {
        employees::get(&pool.conn, id)?.ok_or(AppError::EmployeeNotFound(id))
    }

    pub fn list(pool: &mut DbPool, filter: &ListFilter) -> AppResult<Vec<Employee>> {
        employees::select(&pool.conn, &filter.filters(), filter.sort)
    }

    pub fn update(pool: &mut DbPool, id: i64, patch: EmployeePatch) -> AppResult<Employee> {
        patch.validate()?;

        if employees::update(&pool.conn, id, &patch)? == 0 {
            return Err(AppError::EmployeeNotFound(id));
        }

        let updated = Self::get(pool, id)?;

        audit_or_warn(
            &pool.conn,
            "edit",
            &format!("employee #{}", id),
            &format!("Updated {}", changed_fields(&patch).join(", ")),
        );

        Ok(updated)
    }

    /// Delete an employee. Their pay statements go with them (ON DELETE CASCADE).
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Employee> {
        let existing = Self::get(pool, id)?;
        employees::delete(&pool.conn, id)?;

        audit_or_warn(
            &pool.conn,
            "del",
            &format!("employee #{}", id),
            &format!("Deleted {}", existing.full_name()),
        );

        Ok(existing)
    }
}

fn changed_fields(patch: &EmployeePatch) -> Vec<&'static str> {
    let mut out = Vec::new();
    if patch.first_name.is_some() {
        out.push("first_name");
    }
    if patch.last_name.is_some() {
        out.push("last_name");
    }
    if patch.ssn.is_some() {
        out.push("ssn");
    }
    if patch.email.is_some() {
        out.push("email");
    }
    if patch.phone.is_some() {
        out.push("phone");
    }
    if patch.hire_date.is_some() {
        out.push("hire_date");
    }
    if patch.job_title.is_some() {
        out.push("job_title");
    }
    if patch.division.is_some() {
        out.push("division");
    }
    if patch.salary.is_some() {
        out.push("salary");
    }
    if patch.status.is_some() {
        out.push("status");
    }
    out
}
