//! Application configuration.
//!
//! # Responsibility
//! - Load the TOML config file with per-field defaults.
//! - Hold the third-party API keys and the data directory used for local
//!   blobs (session, saved locations).
//!
//! # Invariants
//! - A missing config file yields the defaults, never an error.
//! - Unknown fields in the file are ignored for forward compatibility.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback coordinates used when no location is available (Jeonju).
pub const FALLBACK_LAT: f64 = 35.8242;
pub const FALLBACK_LON: f64 = 127.1479;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read config file: {err}"),
            Self::Parse(message) => write!(f, "cannot parse config file: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) => None,
        }
    }
}

/// Runtime settings for the planner core.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Directory for local blobs: session, saved locations, database.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Key for the current-conditions API; blank disables the widget.
    #[serde(default)]
    pub weather_api_key: String,
    /// Key for the place-search API; blank disables search.
    #[serde(default)]
    pub geocode_api_key: String,
    #[serde(default = "default_fallback_lat")]
    pub fallback_lat: f64,
    #[serde(default = "default_fallback_lon")]
    pub fallback_lon: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            weather_api_key: String::new(),
            geocode_api_key: String::new(),
            fallback_lat: default_fallback_lat(),
            fallback_lon: default_fallback_lon(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file returns the defaults; a present but malformed file
    /// is an error, since silently ignoring it would hide typos.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };

        toml::from_str(&raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Database file path inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("dayplan.sqlite3")
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_lat() -> f64 {
    FALLBACK_LAT
}

fn default_fallback_lon() -> f64 {
    FALLBACK_LON
}
