//! Configuration handling

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default Sirius API base URL
pub const DEFAULT_SIRIUS_URL: &str = "http://localhost:8081";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides the configured Sirius URL
pub const SIRIUS_URL_ENV: &str = "SIRIUS_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the Sirius API
    pub sirius_url: Option<String>,
    /// Request timeout in seconds, 0 disables the timeout
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("uk.gov.justice", "opg", "sirius-user-management")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env_override(std::env::var(SIRIUS_URL_ENV).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    fn apply_env_override(&mut self, sirius_url: Option<String>) {
        if let Some(url) = sirius_url.filter(|u| !u.trim().is_empty()) {
            self.sirius_url = Some(url);
        }
    }

    pub fn sirius_url(&self) -> &str {
        self.sirius_url.as_deref().unwrap_or(DEFAULT_SIRIUS_URL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
