//! Application configuration management.
//!
//! This module handles loading and saving the client configuration,
//! which holds the server base URL and the per-request timeout.
//!
//! Configuration is stored at `~/.config/homelink/config.json`; the
//! `HOMELINK_SERVER_URL` environment variable overrides the stored URL.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "homelink";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Server URL used when no configuration exists yet
const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// HTTP request timeout in seconds.
/// 30s allows for slow server responses while failing fast enough for
/// an interactive prompt.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        if let Ok(url) = std::env::var("HOMELINK_SERVER_URL") {
            if !url.is_empty() {
                config.server_url = url;
            }
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"server_url": "https://smart.example"}"#)
            .expect("partial config parses");
        assert_eq!(config.server_url, "https://smart.example");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
