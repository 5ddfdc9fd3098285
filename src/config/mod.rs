use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

pub const APP_DIR: &str = ".compound-assist";
pub const CONFIG_FILE: &str = "compound-assist.conf";
pub const DB_FILE: &str = "compound-assist.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_files_dir")]
    pub files_dir: String,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "default_provider_authority")]
    pub provider_authority: String,
    #[serde(default = "default_reminder_lead")]
    pub reminder_lead_minutes: i64,
    #[serde(default = "default_list_limit")]
    pub upcoming_limit: usize,
    #[serde(default = "default_list_limit")]
    pub previous_limit: usize,
    #[serde(default = "default_security_email")]
    pub security_email: String,
    #[serde(default = "default_security_phone")]
    pub security_phone: String,
    #[serde(default = "default_maintenance_phone")]
    pub maintenance_phone: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_files_dir() -> String {
    Config::config_dir().join("files").to_string_lossy().to_string()
}
fn default_cache_dir() -> String {
    Config::config_dir().join("cache").to_string_lossy().to_string()
}
fn default_provider_authority() -> String {
    "com.compoundassist.fileprovider".to_string()
}
fn default_reminder_lead() -> i64 {
    10
}
fn default_list_limit() -> usize {
    20
}
fn default_security_email() -> String {
    "frcsecurity@falcompound.net".to_string()
}
fn default_security_phone() -> String {
    "4001".to_string()
}
fn default_maintenance_phone() -> String {
    "4022".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            files_dir: default_files_dir(),
            cache_dir: default_cache_dir(),
            provider_authority: default_provider_authority(),
            reminder_lead_minutes: default_reminder_lead(),
            upcoming_limit: default_list_limit(),
            previous_limit: default_list_limit(),
            security_email: default_security_email(),
            security_phone: default_security_phone(),
            maintenance_phone: default_maintenance_phone(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("compound-assist")
        } else {
            let home = env::var("HOME")
                .map(PathBuf::from)
                .ok()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            home.join(APP_DIR)
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration file, private storage folders and database file.
    /// An existing configuration is kept; only a custom database is applied.
    pub fn init_all(custom_db: Option<&str>) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Self::load()?;

        if let Some(name) = custom_db {
            let p = Path::new(name);
            let db_path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            };
            config.database = db_path.to_string_lossy().to_string();
        }

        config.save_to(&Self::config_file())?;

        fs::create_dir_all(&config.files_dir)?;
        fs::create_dir_all(&config.cache_dir)?;

        let db_path = Path::new(&config.database);
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(db_path)?;
        }

        Ok(config)
    }

    /// Keys that are absent from the YAML document on disk.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let on_disk: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let full = serde_yaml::to_value(Self::default())?;

        let (Some(disk), Some(all)) = (on_disk.as_mapping(), full.as_mapping()) else {
            return Err(AppError::Config(format!(
                "{} is not a YAML mapping",
                path.display()
            )));
        };

        Ok(all
            .keys()
            .filter(|k| !disk.contains_key(*k))
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect())
    }
}
