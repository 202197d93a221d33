//! Config file maintenance: detect keys missing from an older file and
//! write them back with their default values.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()).map_err(|_| AppError::ConfigSave)? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::ConfigSave),
    }
}

/// Keys known to the current `Config` that the file at `path` lacks.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value, keeping existing values.
///   Returns:
///   Ok(n) → number of keys added (0 means the file was already complete)
pub fn migrate_config_file(path: &Path) -> AppResult<usize> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut added = 0;
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            current.insert(k, v);
            added += 1;
        }
    }

    if added > 0 {
        let yaml = serde_yaml::to_string(&Value::Mapping(current))
            .map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml)?;
    }

    Ok(added)
}
