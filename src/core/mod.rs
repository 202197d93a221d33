pub mod adjust;
pub mod backup;
pub mod config;
pub mod directory;
pub mod import;
pub mod log;
pub mod payroll;
pub mod report;
pub mod search;
