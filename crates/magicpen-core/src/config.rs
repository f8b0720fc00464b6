//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use magicpen_api::{ApiConfig, DEFAULT_BASE_URL};

use crate::error::CoreError;
use crate::Result;

/// Overrides the API base URL.
pub const API_URL_ENV: &str = "MAGICPEN_API_URL";
/// Overrides the directory holding the local database.
pub const DATA_DIR_ENV: &str = "MAGICPEN_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// API origin including the `/api` prefix
    pub api_base_url: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("magicpen.db"),
            api_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("MagicPen"))
            .unwrap_or_else(|| PathBuf::from(".magicpen"))
    }

    /// Defaults with `MAGICPEN_DATA_DIR` / `MAGICPEN_API_URL` applied.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::data_dir);

        let mut config = Self::new(data_dir);
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api_base_url).map_err(|e| {
            CoreError::Config(format!("Invalid API URL {}: {}", self.api_base_url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(CoreError::Config(format!(
                "API URL must be http(s): {}",
                self.api_base_url
            )));
        }

        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_base_url.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
