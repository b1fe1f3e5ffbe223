//! Launcher Config
//!
//! Bootstrap settings for the controller itself, read from
//! `cultivation-settings.toml` in the platform config directory. Every field
//! is optional; missing ones fall back to platform defaults.

use crate::constants::*;
use crate::error::Result;
use crate::helpers::{self, get_or_create_config_dir};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

fn get_config_path() -> Result<PathBuf> {
    let config_dir = get_or_create_config_dir()?;
    let path = config_dir.join(LAUNCHER_CONFIG_FILE_NAME);
    if !path.exists() {
        std::fs::write(&path, "")?;
    }
    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Override for the application data directory
    pub data_dir: Option<PathBuf>,
    /// Override for the configuration record file
    pub config_file: Option<PathBuf>,
    /// Root of the version metadata index; offline when unset
    pub resources_base_url: Option<String>,
    /// Server config file name, looked up next to the Grasscutter jar
    pub server_config_name: String,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Directory holding `lang/` and `themes/`
    pub resources_dir: Option<PathBuf>,
    /// Versions offered while offline
    pub client_versions: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            config_file: None,
            resources_base_url: None,
            server_config_name: SERVER_CONFIG_FILE_NAME.to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            resources_dir: None,
            client_versions: Vec::new(),
        }
    }
}

impl LauncherConfig {
    /// Load from the platform config directory, creating an empty file on first run
    pub fn try_load() -> Result<Self> {
        let path = get_config_path()?;
        info!(path = ?path, "Loading launcher config");
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let value = std::fs::read_to_string(path)?;
        Self::parse(&value).inspect_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse launcher config");
        })
    }

    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(value)?)
    }

    /// Application data directory, from the override or the platform
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => helpers::application_data_dir(),
        }
    }

    /// `<data>/cultivation/configuration.json` unless overridden
    pub fn config_file(&self, data_dir: &Path) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| helpers::launcher_dir(data_dir).join(CONFIG_FILE_NAME))
    }

    pub fn resource_cache_file(&self, data_dir: &Path) -> PathBuf {
        helpers::launcher_dir(data_dir).join(RESOURCE_CACHE_FILE_NAME)
    }

    pub fn resources_dir(&self, data_dir: &Path) -> PathBuf {
        self.resources_dir
            .clone()
            .unwrap_or_else(|| helpers::launcher_dir(data_dir))
    }

    pub fn log_dir(&self, data_dir: &Path) -> PathBuf {
        helpers::launcher_dir(data_dir).join(LOG_DIR_NAME)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL, ignoring blank values
    pub fn resources_base_url(&self) -> Option<&str> {
        self.resources_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
