//! Connection configuration loading.
//!
//! Resolution priority:
//! 1. `~/.config/tandem/config.toml`
//! 2. Environment variables (`TANDEM_REMOTE_URL`, `TANDEM_REMOTE_KEY`)

use std::env;
use std::fs;
use std::path::PathBuf;
use tandem_core::config::RemoteConfig;
use tandem_core::error::{Result, TandemError};

pub const URL_ENV: &str = "TANDEM_REMOTE_URL";
pub const KEY_ENV: &str = "TANDEM_REMOTE_KEY";

/// Read-only storage for the connection configuration file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Points at the default config location under the user config dir.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TandemError::config("could not determine config directory"))?;
        Ok(Self {
            path: config_dir.join("tandem").join("config.toml"),
        })
    }

    /// Points at an explicit config file (tests, alternate profiles).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads and validates the config file.
    pub fn load(&self) -> Result<RemoteConfig> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            TandemError::config(format!(
                "could not read {}: {err}",
                self.path.display()
            ))
        })?;
        let config: RemoteConfig = toml::from_str(&raw).map_err(|err| {
            TandemError::Serialization {
                format: "TOML".to_string(),
                message: err.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config file, falling back to environment variables.
    pub fn load_or_env(&self) -> Result<RemoteConfig> {
        if let Ok(config) = self.load() {
            return Ok(config);
        }
        from_env()
    }
}

/// Builds the config from environment variables alone.
pub fn from_env() -> Result<RemoteConfig> {
    let url = env::var(URL_ENV)
        .map_err(|_| TandemError::config(format!("{URL_ENV} is not set")))?;
    let api_key = env::var(KEY_ENV)
        .map_err(|_| TandemError::config(format!("{KEY_ENV} is not set")))?;
    let config = RemoteConfig::new(url, api_key);
    config.validate()?;
    Ok(config)
}
