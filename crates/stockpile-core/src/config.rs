//! Application configuration management.
//!
//! Configuration is stored at `~/.config/stockpile/config.json` and holds
//! the product API base URL, the hydration page size and optional cache/log
//! directory overrides. Missing files and missing fields fall back to
//! defaults; `STOCKPILE_*` environment variables override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::sync::controller::DEFAULT_LIST_LIMIT;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "stockpile";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub list_limit: u32,
    pub request_timeout_secs: u64,
    pub cache_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_dir: None,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply `STOCKPILE_BASE_URL`, `STOCKPILE_CACHE_DIR` and `STOCKPILE_LIST_LIMIT`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STOCKPILE_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(dir) = lookup("STOCKPILE_CACHE_DIR").filter(|v| !v.is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(limit) = lookup("STOCKPILE_LIST_LIMIT") {
            match limit.parse() {
                Ok(limit) => self.list_limit = limit,
                Err(e) => warn!(value = %limit, error = %e, "Ignoring invalid STOCKPILE_LIST_LIMIT"),
            }
        }
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
