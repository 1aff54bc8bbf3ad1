//! Client configuration.

use crate::api::DEFAULT_BASE_URL;
use crate::error::{Result, SnoozeError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "SNOOZE_BASE_URL";

/// Root of `config.toml`.
///
/// ```toml
/// base_url = "https://hack-or-snooze-v3.herokuapp.com"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API endpoint without trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Applies `SNOOZE_BASE_URL` when it is set and not blank.
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) => self.with_base_url_override(Some(url)),
            Err(_) => self,
        }
    }

    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// Checks the base url and returns it without a trailing slash.
    pub fn validated_base_url(&self) -> Result<String> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            SnoozeError::config(format!("base_url '{}' is invalid: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SnoozeError::config(format!(
                "base_url '{}' must use http or https",
                self.base_url
            )));
        }
        Ok(self.base_url.trim_end_matches('/').to_string())
    }
}
