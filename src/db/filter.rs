//! Composable row filters for the record store.
//!
//! A [`Filter`] tree compiles to a parameterised SQL `WHERE` fragment.
//! Column names only ever come from the closed [`Column`] enum, user input
//! only ever travels as bound parameters.

use rusqlite::types::Value;

/// Columns that can appear in a filter. `e` aliases `employees`,
/// `p` aliases `pay_statements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    EmployeeId,
    FirstName,
    LastName,
    Ssn,
    JobTitle,
    Division,
    Salary,
    Status,
    StatementEmployeeId,
    PeriodStart,
    PeriodEnd,
}

impl Column {
    pub const fn sql(self) -> &'static str {
        match self {
            Self::EmployeeId => "e.id",
            Self::FirstName => "e.first_name",
            Self::LastName => "e.last_name",
            Self::Ssn => "e.ssn",
            Self::JobTitle => "e.job_title",
            Self::Division => "e.division",
            Self::Salary => "e.salary",
            Self::Status => "e.status",
            Self::StatementEmployeeId => "p.employee_id",
            Self::PeriodStart => "p.period_start",
            Self::PeriodEnd => "p.period_end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(Column, Value),
    /// Case-insensitive substring match.
    Contains(Column, String),
    Gte(Column, Value),
    Gt(Column, Value),
    Lt(Column, Value),
    Lte(Column, Value),
    Or(Vec<Filter>),
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(col: Column, v: impl Into<Value>) -> Self {
        Self::Eq(col, v.into())
    }

    pub fn contains(col: Column, needle: impl Into<String>) -> Self {
        Self::Contains(col, needle.into())
    }

    pub fn gte(col: Column, v: impl Into<Value>) -> Self {
        Self::Gte(col, v.into())
    }

    pub fn gt(col: Column, v: impl Into<Value>) -> Self {
        Self::Gt(col, v.into())
    }

    pub fn lt(col: Column, v: impl Into<Value>) -> Self {
        Self::Lt(col, v.into())
    }

    pub fn lte(col: Column, v: impl Into<Value>) -> Self {
        Self::Lte(col, v.into())
    }

    /// Compile into SQL, appending bound values to `params`.
    fn compile(&self, params: &mut Vec<Value>) -> String {
        match self {
            Filter::Eq(c, v) => binary(c.sql(), "=", v, params),
            Filter::Gte(c, v) => binary(c.sql(), ">=", v, params),
            Filter::Gt(c, v) => binary(c.sql(), ">", v, params),
            Filter::Lt(c, v) => binary(c.sql(), "<", v, params),
            Filter::Lte(c, v) => binary(c.sql(), "<=", v, params),
            Filter::Contains(c, needle) => {
                params.push(Value::Text(needle.to_lowercase()));
                format!("instr(fold({}), ?{}) > 0", c.sql(), params.len())
            }
            Filter::Or(parts) => join(parts, " OR ", "0", params),
            Filter::And(parts) => join(parts, " AND ", "1", params),
        }
    }
}

fn binary(col: &str, op: &str, v: &Value, params: &mut Vec<Value>) -> String {
    params.push(v.clone());
    format!("{col} {op} ?{}", params.len())
}

fn join(parts: &[Filter], sep: &str, empty: &str, params: &mut Vec<Value>) -> String {
    if parts.is_empty() {
        return empty.to_string();
    }
    let compiled: Vec<String> = parts.iter().map(|f| f.compile(params)).collect();
    format!("({})", compiled.join(sep))
}

/// Compile a list of filters combined with AND into ` WHERE ...`.
///
/// Returns an empty clause when `filters` is empty.
pub fn where_clause(filters: &[Filter]) -> (String, Vec<Value>) {
    let mut params = Vec::new();
    if filters.is_empty() {
        return (String::new(), params);
    }

    let parts: Vec<String> = filters.iter().map(|f| f.compile(&mut params)).collect();
    (format!(" WHERE {}", parts.join(" AND ")), params)
}
