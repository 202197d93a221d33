use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    pub fn backup(pool: &mut DbPool, cfg: &Config, dest_file: &str, compress: bool) -> AppResult<()> {
        let src = Path::new(&cfg.database);
        let dest = crate::utils::path::expand_tilde(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // 2.5️⃣ If destination file exists → ask confirmation
        if dest.exists()
            && !confirm(&format!(
                "The file '{}' already exists. Overwrite it?",
                dest.display()
            ))
        {
            info("Backup cancelled by user.");
            return Ok(());
        }

        // 3️⃣ Copy database (flush WAL pages first)
        pool.conn.execute_batch("PRAGMA wal_checkpoint(FULL);")?;
        fs::copy(src, &dest)?;
        success(format!("Backup created: {}", dest.display()));

        // 4️⃣ Optional compression
        let final_path = if compress {
            let zip_path = dest.with_extension("zip");
            zip_file(&dest, &zip_path)?;
            success(format!("📦 Compressed: {}", zip_path.display()));

            if let Err(e) = fs::remove_file(&dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            zip_path
        } else {
            dest
        };

        // 5️⃣ Log in DB
        audit_or_warn(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(())
    }
}

/// Zip `src` into `zip_path` as a single deflated entry.
pub fn zip_file(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "database.sqlite".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(())
}

/// Timestamped zip copy of the database next to it, taken before a schema upgrade.
pub fn backup_before_migration(db_path: &str) -> AppResult<PathBuf> {
    let src = Path::new(db_path);
    let name = format!(
        "{}-backup_db_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let zip_path = src
        .parent()
        .map(|p| p.join(&name))
        .unwrap_or_else(|| PathBuf::from(&name));

    zip_file(src, &zip_path)?;
    Ok(zip_path)
}
