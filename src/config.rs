//! Configuration Management
//!
//! Handles persistent configuration storage for the CloudStack client.
//! Environment variables take precedence over the config file.

use crate::cloudstack::auth::Credentials;
use crate::error::{CloudStackError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_API_URL: &str = "CLOUDSTACK_API_URL";
pub const ENV_API_KEY: &str = "CLOUDSTACK_API_KEY";
pub const ENV_SECRET_KEY: &str = "CLOUDSTACK_SECRET_KEY";
pub const ENV_TIMEOUT: &str = "CLOUDSTACK_TIMEOUT";
pub const ENV_VERIFY_SSL: &str = "CLOUDSTACK_VERIFY_SSL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Management server API endpoint
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Verify the server's TLS certificate
    #[serde(default)]
    pub verify_ssl: Option<bool>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cloudstack").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective API URL (env > config)
    pub fn effective_api_url(&self) -> Option<String> {
        env_string(ENV_API_URL).or_else(|| self.api_url.clone())
    }

    /// Get effective API key (env > config)
    pub fn effective_api_key(&self) -> Option<String> {
        env_string(ENV_API_KEY).or_else(|| self.api_key.clone())
    }

    /// Get effective secret key (env > config)
    pub fn effective_secret_key(&self) -> Option<String> {
        env_string(ENV_SECRET_KEY).or_else(|| self.secret_key.clone())
    }

    /// Get effective timeout (env > config > default)
    pub fn effective_timeout(&self) -> u64 {
        env_string(ENV_TIMEOUT)
            .and_then(|v| match v.parse() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    tracing::warn!("Invalid {} value {:?}, ignoring", ENV_TIMEOUT, v);
                    None
                },
            })
            .or(self.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Get effective TLS verification flag (env > config > true)
    pub fn effective_verify_ssl(&self) -> bool {
        env_string(ENV_VERIFY_SSL)
            .map(|v| parse_bool(&v))
            .or(self.verify_ssl)
            .unwrap_or(true)
    }

    /// Credentials from the effective keys
    pub fn credentials(&self) -> Result<Credentials> {
        let api_key = self
            .effective_api_key()
            .ok_or_else(|| CloudStackError::Config("API key is not set".to_string()))?;
        let secret_key = self
            .effective_secret_key()
            .ok_or_else(|| CloudStackError::Config("secret key is not set".to_string()))?;
        Ok(Credentials::new(api_key, secret_key))
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
