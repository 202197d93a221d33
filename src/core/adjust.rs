//! Bulk salary adjustment over a salary range.

use crate::db::employees::{self, EmployeeSort};
use crate::db::filter::{Column, Filter};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::formatting::format_amount;
use serde::Serialize;

pub const MAX_PERCENTAGE: f64 = 100.0;

/// Half-open salary interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    pub fn new(min: f64, max: f64) -> AppResult<Self> {
        let valid = min.is_finite() && max.is_finite() && min >= 0.0 && min < max;
        if !valid {
            return Err(AppError::InvalidSalaryRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, salary: f64) -> bool {
        salary >= self.min && salary < self.max
    }

    fn filters(&self) -> Vec<Filter> {
        vec![
            Filter::gte(Column::Salary, self.min),
            Filter::lt(Column::Salary, self.max),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryChange {
    pub employee_id: i64,
    pub name: String,
    pub old_salary: f64,
    pub new_salary: f64,
}

impl SalaryChange {
    pub fn delta(&self) -> f64 {
        self.new_salary - self.old_salary
    }
}

/// Outcome of a bulk adjustment (or of its dry run).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub percentage: f64,
    pub range: SalaryRange,
    pub changes: Vec<SalaryChange>,
    pub dry_run: bool,
}

impl Adjustment {
    pub fn affected(&self) -> usize {
        self.changes.len()
    }

    pub fn total_increase(&self) -> f64 {
        self.changes.iter().map(SalaryChange::delta).sum()
    }

    /// One-line outcome, prefixed with "Dry run: " when nothing was written.
    pub fn summary(&self) -> String {
        if self.dry_run {
            format!("Dry run: {}", self.describe())
        } else {
            self.describe()
        }
    }

    /// The outcome without any dry-run label.
    pub fn describe(&self) -> String {
        format!(
            "{} employee(s) affected: +{}% for salaries in [{}, {}), payroll +{}",
            self.affected(),
            self.percentage,
            format_amount(self.range.min),
            format_amount(self.range.max),
            format_amount(self.total_increase()),
        )
    }
}

/// New salary after a raise of `percentage`, rounded to the nearest whole unit.
pub fn adjusted_salary(salary: f64, percentage: f64) -> f64 {
    (salary * (1.0 + percentage / 100.0)).round()
}

pub fn validate_percentage(percentage: f64) -> AppResult<()> {
    if !percentage.is_finite() || !(0.0..=MAX_PERCENTAGE).contains(&percentage) {
        return Err(AppError::InvalidPercentage(percentage));
    }
    Ok(())
}

pub struct AdjustLogic;

impl AdjustLogic {
    /// Raise every salary in `range` by `percentage`.
    ///
    /// Selection and updates share one transaction: either every matching
    /// employee is updated or none is. With `dry_run` nothing is written.
    pub fn apply(
        pool: &mut DbPool,
        percentage: f64,
        range: SalaryRange,
        dry_run: bool,
    ) -> AppResult<Adjustment> {
        validate_percentage(percentage)?;
        let range = SalaryRange::new(range.min, range.max)?;

        let tx = pool.transaction()?;

        let matching = employees::select(&tx, &range.filters(), EmployeeSort::Id)?;

        let changes: Vec<SalaryChange> = matching
            .iter()
            .map(|e| SalaryChange {
                employee_id: e.id,
                name: e.full_name(),
                old_salary: e.salary,
                new_salary: adjusted_salary(e.salary, percentage),
            })
            .collect();

        let adjustment = Adjustment {
            percentage,
            range,
            changes,
            dry_run,
        };

        if dry_run {
            // tx dropped → rollback, nothing was written anyway
            return Ok(adjustment);
        }

        for change in &adjustment.changes {
            let touched = employees::set_salary(&tx, change.employee_id, change.new_salary)
                .map_err(|e| {
                    AppError::AdjustmentAborted(format!(
                        "update of employee #{} failed: {}",
                        change.employee_id, e
                    ))
                })?;

            if touched != 1 {
                return Err(AppError::AdjustmentAborted(format!(
                    "employee #{} changed during the update",
                    change.employee_id
                )));
            }
        }

        audit(
            &tx,
            "adjust",
            &format!("+{}%", percentage),
            &adjustment.summary(),
        )?;

        tx.commit()?;

        Ok(adjustment)
    }
}
