use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use std::fs;
use std::io;
use std::path::Path;

/// Handle the `backup` command: copy the HR database to `--file`,
/// optionally zipped.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let db = Path::new(&cfg.database);

        // opening the pool would create an empty database
        if !db.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", db.display()),
            )
            .into());
        }

        if is_same_file(db, &expand_tilde(file)) {
            return Err(AppError::InvalidField {
                field: "file".to_string(),
                message: format!("'{}' is the database itself", file),
            });
        }

        let mut pool = DbPool::new(&cfg.database)?;
        BackupLogic::backup(&mut pool, cfg, file, *compress)?;
    }

    Ok(())
}

/// True when both paths resolve to the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
