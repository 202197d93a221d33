//! Monthly pay reports grouped by job title or division.

use crate::db::pay_statements;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::pay_group::{GroupBy, Month, PayGroup};
use crate::models::pay_statement::PayRow;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct PayReport {
    pub month: Month,
    pub group_by: GroupBy,
    pub groups: Vec<PayGroup>,
}

impl PayReport {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_pay(&self) -> f64 {
        self.groups.iter().map(|g| g.total_pay).sum()
    }

    pub fn statement_count(&self) -> i64 {
        self.groups.iter().map(|g| g.employee_count).sum()
    }

    /// Grand total as a pseudo-group, used for the footer row.
    pub fn grand_total(&self) -> PayGroup {
        PayGroup {
            key: "TOTAL".to_string(),
            total_pay: self.total_pay(),
            employee_count: self.statement_count(),
        }
    }
}

/// Group already-fetched rows by `by` and reduce each group to sum + count.
/// Groups come back sorted by key.
pub fn aggregate(rows: &[PayRow], by: GroupBy) -> Vec<PayGroup> {
    let mut acc: BTreeMap<&str, (f64, i64)> = BTreeMap::new();

    for row in rows {
        let entry = acc.entry(by.key_of(row)).or_insert((0.0, 0));
        entry.0 += row.gross_pay;
        entry.1 += 1;
    }

    acc.into_iter()
        .map(|(key, (total_pay, employee_count))| PayGroup {
            key: key.to_string(),
            total_pay,
            employee_count,
        })
        .collect()
}

pub struct ReportLogic;

impl ReportLogic {
    /// Grouped totals for `month`; the grouping runs inside the store.
    pub fn build(pool: &mut DbPool, month: Month, group_by: GroupBy) -> AppResult<PayReport> {
        let groups = pay_statements::totals_grouped(&pool.conn, &month, group_by)?;
        Ok(PayReport {
            month,
            group_by,
            groups,
        })
    }

    /// Individual statements of `month` together with their per-group
    /// subtotals, reduced client-side from the same rows.
    pub fn statements(
        pool: &mut DbPool,
        month: Month,
        group_by: GroupBy,
    ) -> AppResult<(Vec<PayRow>, PayReport)> {
        let rows = pay_statements::select_rows_in_month(&pool.conn, &month)?;
        let groups = aggregate(&rows, group_by);
        Ok((
            rows,
            PayReport {
                month,
                group_by,
                groups,
            },
        ))
    }
}
