//! Application configuration.

use crate::consts::cli_consts::{ALERT_THRESHOLD_MINUTES, http, refresh};
use crate::endpoints::{DiscoveryMode, Endpoints};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

/// Directory under the home directory holding the config file.
const CONFIG_DIR: &str = ".quadrant-dash";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "quadrant-dash.log";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the sensor data source, e.g. `http://raspberrypi.local:5000`.
    pub base_url: String,
    /// Which discovery endpoint variant the data source serves.
    pub discovery: DiscoveryMode,
    /// Path of the data endpoint.
    pub data_path: String,
    pub data_interval_secs: u64,
    pub label_interval_secs: u64,
    /// Quadrants alert when their reading is older than this.
    pub alert_threshold_minutes: i64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: http::DEFAULT_BASE_URL.to_string(),
            discovery: DiscoveryMode::default(),
            data_path: http::DEFAULT_DATA_PATH.to_string(),
            data_interval_secs: refresh::DATA_INTERVAL_SECS,
            label_interval_secs: refresh::LABEL_INTERVAL_SECS,
            alert_threshold_minutes: ALERT_THRESHOLD_MINUTES,
            request_timeout_secs: http::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// Fields absent from the file take their default values.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the file at `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Deletes the configuration file, if present.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.clone(), self.discovery, self.data_path.clone())
    }

    /// Interval between data refreshes; never shorter than one second.
    pub fn data_interval(&self) -> Duration {
        Duration::from_secs(self.data_interval_secs.max(1))
    }

    /// Interval between label discoveries; never shorter than one second.
    pub fn label_interval(&self) -> Duration {
        Duration::from_secs(self.label_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Path of the config file in the user's home directory.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Log file used while the TUI owns the terminal, next to the config file.
pub fn get_log_path(config_path: &Path) -> PathBuf {
    config_path.with_file_name(LOG_FILE)
}
