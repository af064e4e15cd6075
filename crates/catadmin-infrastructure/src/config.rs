//! Configuration loading.
//!
//! Reads `config.toml` when present, then applies environment overrides.
//! A missing file is not an error: every field has a default.

use std::fs;
use std::path::Path;

use catadmin_core::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Overrides `[api] base_url`.
pub const API_URL_ENV: &str = "CATADMIN_API_URL";
/// Overrides `[logging] level`.
pub const LOG_LEVEL_ENV: &str = "CATADMIN_LOG";

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend root; endpoint paths such as `/auth/login` are appended.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AdminConfig {
    /// Loads the file at `path` (if it exists) and applies environment
    /// overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses the file at `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps an environment variable
    /// name to its value. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.logging.level = level;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AdminError::config("api.base_url must not be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AdminError::config("api.timeout_secs must be positive"));
        }
        Ok(())
    }
}
