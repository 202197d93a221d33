//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError so that a store
//! failure, a validation failure and an empty result never look alike.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Invalid percentage: {0} (must be between 0 and 100)")]
    InvalidPercentage(f64),

    #[error("Invalid salary range [{min}, {max}): bounds must be non-negative and min < max")]
    InvalidSalaryRange { min: f64, max: f64 },

    #[error("Invalid salary: {0} (must be a non-negative amount)")]
    InvalidSalary(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid status: {0} (use 'active' or 'inactive')")]
    InvalidStatus(String),

    #[error("Invalid employee id: '{0}' is not a number")]
    InvalidEmployeeId(String),

    #[error("Invalid search term: {0}")]
    InvalidSearchTerm(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Nothing to update: no field was given")]
    EmptyPatch,

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("Employee #{0} not found")]
    EmployeeNotFound(i64),

    #[error("Another employee already uses {field} '{value}'")]
    DuplicateEmployee { field: String, value: String },

    #[error("Salary adjustment aborted, no salary was changed: {0}")]
    AdjustmentAborted(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Import / export errors
    // ---------------------------
    #[error("Import failed at line {line}: {message}")]
    Import { line: u64, message: String },

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
