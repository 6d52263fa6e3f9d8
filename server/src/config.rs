//! Configuration management for the server.

use std::env;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory holding the storage documents
    pub data_dir: PathBuf,
    /// Storage origin; names the document inside `data_dir`
    pub storage_origin: String,
    /// Seed demo data into empty collections at startup
    pub seed_on_start: bool,
    /// Days ahead of expiry at which documents are flagged
    pub alert_warn_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            storage_origin: "transmarin".to_string(),
            seed_on_start: true,
            alert_warn_days: transmarin_engine::expiry::DEFAULT_WARN_DAYS,
        }
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
            None => defaults.port,
        };

        let data_dir = lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir);

        let storage_origin = lookup("STORAGE_ORIGIN")
            .filter(|origin| !origin.trim().is_empty())
            .unwrap_or(defaults.storage_origin);

        let seed_on_start = match lookup("SEED_ON_START") {
            Some(raw) => parse_bool("SEED_ON_START", &raw)?,
            None => defaults.seed_on_start,
        };

        let alert_warn_days = match lookup("ALERT_WARN_DAYS") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|days: &i64| *days >= 0)
                .ok_or(ConfigError::InvalidWarnDays(raw))?,
            None => defaults.alert_warn_days,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            storage_origin,
            seed_on_start,
            alert_warn_days,
        })
    }

    /// Path of the storage document for the configured origin.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_origin))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid boolean for {var}: {value}")]
    InvalidBool { var: &'static str, value: String },

    #[error("Invalid ALERT_WARN_DAYS value: {0}")]
    InvalidWarnDays(String),
}
