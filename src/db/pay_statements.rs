//! Typed queries over the `pay_statements` table, including the joined
//! projection into the owning employee and the grouped report query.

use crate::db::filter::{Column, Filter, where_clause};
use crate::errors::{AppError, AppResult};
use crate::models::pay_group::{GroupBy, Month, PayGroup};
use crate::models::pay_statement::{NewPayStatement, PayRow, PayStatement};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params, params_from_iter};

fn parse_date_col(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(raw.clone())),
        )
    })
}

pub fn map_row(row: &Row) -> rusqlite::Result<PayStatement> {
    Ok(PayStatement {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        period_start: parse_date_col(row, "period_start")?,
        period_end: parse_date_col(row, "period_end")?,
        gross_pay: row.get("gross_pay")?,
        deductions: row.get("deductions")?,
        net_pay: row.get("net_pay")?,
        created_at: row.get("created_at")?,
    })
}

fn map_pay_row(row: &Row) -> rusqlite::Result<PayRow> {
    Ok(PayRow {
        statement_id: row.get("statement_id")?,
        employee_id: row.get("employee_id")?,
        employee_name: row.get("employee_name")?,
        job_title: row.get("job_title")?,
        division: row.get("division")?,
        period_start: parse_date_col(row, "period_start")?,
        period_end: parse_date_col(row, "period_end")?,
        gross_pay: row.get("gross_pay")?,
    })
}

/// Filters selecting statements whose whole period lies inside `month`.
pub fn month_filters(month: &Month) -> Vec<Filter> {
    vec![
        Filter::gte(
            Column::PeriodStart,
            month.first_day().format("%Y-%m-%d").to_string(),
        ),
        Filter::lte(
            Column::PeriodEnd,
            month.last_day().format("%Y-%m-%d").to_string(),
        ),
    ]
}

pub fn insert(conn: &Connection, st: &NewPayStatement) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO pay_statements (employee_id, period_start, period_end, gross_pay, deductions, net_pay)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        st.employee_id,
        st.period_start.format("%Y-%m-%d").to_string(),
        st.period_end.format("%Y-%m-%d").to_string(),
        st.gross_pay,
        st.deductions,
        st.net_pay,
    ])?;
    Ok(conn.last_insert_rowid())
}

pub fn select(conn: &Connection, filters: &[Filter]) -> AppResult<Vec<PayStatement>> {
    let (where_sql, values) = where_clause(filters);
    let sql = format!(
        "SELECT p.id, p.employee_id, p.period_start, p.period_end, p.gross_pay, p.deductions,
                p.net_pay, p.created_at
         FROM pay_statements p{where_sql}
         ORDER BY p.period_start ASC, p.employee_id ASC, p.id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Statements of `month` joined with their owner's name, title and division.
pub fn select_rows_in_month(conn: &Connection, month: &Month) -> AppResult<Vec<PayRow>> {
    let (where_sql, values) = where_clause(&month_filters(month));
    let sql = format!(
        "SELECT p.id AS statement_id, p.employee_id, e.first_name || ' ' || e.last_name AS employee_name,
                e.job_title, e.division, p.period_start, p.period_end, p.gross_pay
         FROM pay_statements p
         JOIN employees e ON e.id = p.employee_id{where_sql}
         ORDER BY p.period_start ASC, p.id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_pay_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Grouped sum/count of gross pay for `month`, computed by the store.
/// Groups are ordered by key.
pub fn totals_grouped(conn: &Connection, month: &Month, by: GroupBy) -> AppResult<Vec<PayGroup>> {
    let (where_sql, values) = where_clause(&month_filters(month));
    let key = by.column();
    let sql = format!(
        "SELECT e.{key} AS group_key, SUM(p.gross_pay) AS total_pay, COUNT(p.id) AS statement_count
         FROM pay_statements p
         JOIN employees e ON e.id = p.employee_id{where_sql}
         GROUP BY e.{key}
         ORDER BY e.{key} ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(PayGroup {
            key: row.get("group_key")?,
            total_pay: row.get("total_pay")?,
            employee_count: row.get("statement_count")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM pay_statements", [], |row| row.get(0))?)
}
