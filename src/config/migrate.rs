use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use rusqlite::Connection;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Fill every key missing from the YAML config with its default value,
/// keeping the values already present (and their order) untouched.
///
/// Returns the names of the keys that were added. Running it on an
/// up-to-date file is a no-op and writes nothing.
pub fn fill_missing_keys(conf_file: &Path) -> AppResult<Vec<String>> {
    if !conf_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(conf_file)?;
    let mut yaml: Value = serde_yaml::from_str(&content)?;
    let defaults = serde_yaml::to_value(super::Config::default())?;

    let (Some(map), Some(defaults)) = (yaml.as_mapping_mut(), defaults.as_mapping()) else {
        return Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            conf_file.display()
        )));
    };

    let mut added = Vec::new();
    for (key, value) in defaults {
        if !map.contains_key(key) {
            map.insert(key.clone(), value.clone());
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&yaml)?;
    fs::write(conf_file, serialized)?;

    Ok(added)
}

/// `config --migrate`: update the file and leave a trace in the audit log.
pub fn run_config_migration(conn: &Connection, conf_file: &Path) -> AppResult<()> {
    let added = fill_missing_keys(conf_file)?;

    if added.is_empty() {
        info("Configuration is up to date.");
        return Ok(());
    }

    let msg = format!("added {}", added.join(", "));
    ttlog(conn, "config_migrate", &conf_file.to_string_lossy(), &msg)?;
    success(format!("Configuration migrated: {}", msg));

    Ok(())
}
