pub mod adjust;
pub mod backup;
pub mod config;
pub mod db;
pub mod employee;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod pay;
pub mod report;
pub mod search;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::pay_group::Month;

/// Open the configured database with an up-to-date schema.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// `--month` value or the current month.
pub(crate) fn resolve_month(month: &Option<String>) -> AppResult<Month> {
    match month {
        Some(m) => Month::parse(m),
        None => Ok(Month::current()),
    }
}
