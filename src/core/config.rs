//! Maintenance of the YAML configuration file.

use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_fields};
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// The effective configuration as YAML (file values merged with defaults).
    pub fn render(cfg: &Config) -> AppResult<String> {
        serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Keys the file is missing. A file that does not exist yet has none.
    pub fn check(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        missing_fields(path)
    }

    pub fn migrate(path: &Path) -> AppResult<usize> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} not found, run `hrledger init` first",
                path.display()
            )));
        }
        migrate_config_file(path)
    }

    /// Open `path` in `editor`, then $EDITOR / $VISUAL, then the platform default.
    /// Returns the editor that succeeded.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<String> {
        let fallback = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let mut candidates = Vec::new();
        if let Some(e) = editor {
            candidates.push(e.clone());
        }
        if !candidates.contains(&fallback) {
            candidates.push(fallback);
        }

        for ed in &candidates {
            if let Ok(status) = Command::new(ed).arg(path).status()
                && status.success()
            {
                return Ok(ed.clone());
            }
        }

        Err(AppError::Config(format!(
            "no usable editor (tried: {})",
            candidates.join(", ")
        )))
    }
}
