use super::pay_statement::PayRow;
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping key of an aggregate pay report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[value(alias = "job-title")]
    Title,
    Division,
}

impl GroupBy {
    /// Column of `employees` that carries the key.
    pub fn column(&self) -> &'static str {
        match self {
            GroupBy::Title => "job_title",
            GroupBy::Division => "division",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Title => "Job title",
            GroupBy::Division => "Division",
        }
    }

    pub fn key_of<'a>(&self, row: &'a PayRow) -> &'a str {
        match self {
            GroupBy::Title => &row.job_title,
            GroupBy::Division => &row.division,
        }
    }
}

/// One row of an aggregate report. `employee_count` counts statements, not
/// distinct employees.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PayGroup {
    pub key: String,
    pub total_pay: f64,
    pub employee_count: i64,
}

impl PayGroup {
    /// Average pay per statement, rounded for display.
    pub fn average(&self) -> i64 {
        if self.employee_count == 0 {
            return 0;
        }
        (self.total_pay / self.employee_count as f64).round() as i64
    }
}

/// A calendar month (YYYY-MM).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .ok()
            .filter(|_| s.len() == 7)
            .map(|first| Self { first })
            .ok_or_else(|| AppError::InvalidMonth(s.to_string()))
    }

    pub fn current() -> Self {
        let today = crate::utils::date::today();
        Self {
            first: today.with_day(1).unwrap_or(today),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.first.month() == 12 {
            (self.first.year() + 1, 1)
        } else {
            (self.first.year(), self.first.month() + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}
