//! Configuration management for StockDesk

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// API base URL used when neither flag, environment nor config sets one
pub const DEFAULT_API_URL: &str = "http://localhost:7777";

/// File name of the client store, kept next to the config file
pub const CLIENT_STORE_FILE: &str = "session.yaml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".stockdesk").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(config_path: Option<&str>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Option<Config> = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config.unwrap_or_default())
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Path of the client store that belongs to the config at `config_path`
    pub fn client_store_path(config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(parent) => parent.join(CLIENT_STORE_FILE),
            None => PathBuf::from(CLIENT_STORE_FILE),
        }
    }

    /// Effective API base URL.
    ///
    /// Precedence: flag or environment override > config file > default.
    pub fn resolve_api_url(&self, override_url: Option<&str>) -> String {
        let non_blank = |url: &&str| !url.trim().is_empty();

        override_url
            .filter(non_blank)
            .or(self.api_url.as_deref().filter(non_blank))
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }

    /// Validate a user-supplied API base URL
    pub fn validate_api_url(url: &str) -> Result<()> {
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "API URL must start with http:// or https://, got '{}'",
                url
            ))
            .into())
        }
    }
}
