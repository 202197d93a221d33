use crate::db::filter::{Column, Filter};
use crate::db::pay_statements;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::pay_group::Month;
use crate::models::pay_statement::PayStatement;

/// Read-only access to pay statements.
pub struct PayrollLogic;

impl PayrollLogic {
    pub fn list(
        pool: &mut DbPool,
        employee_id: Option<i64>,
        month: Option<Month>,
    ) -> AppResult<Vec<PayStatement>> {
        let mut filters = Vec::new();
        if let Some(id) = employee_id {
            filters.push(Filter::eq(Column::StatementEmployeeId, id));
        }
        if let Some(m) = month {
            filters.extend(pay_statements::month_filters(&m));
        }
        pay_statements::select(&pool.conn, &filters)
    }
}
