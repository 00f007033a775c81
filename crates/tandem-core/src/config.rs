//! Connection configuration.

use crate::error::{Result, TandemError};
use serde::{Deserialize, Serialize};

/// Connection parameters for the remote store.
///
/// Owned by startup configuration; the two values map directly onto the
/// hosted service's project endpoint and public API key.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Project endpoint, e.g. `https://example.supabase.co`
    pub url: String,
    /// Public (anon) API key sent with every request
    pub api_key: String,
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Rejects obviously unusable configurations before a client is built.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(TandemError::config("remote URL is empty"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(TandemError::config(format!(
                "remote URL must be http(s): {}",
                self.url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(TandemError::config("remote API key is empty"));
        }
        Ok(())
    }
}
