//! Runtime settings resolved from flags and environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::{Path, PathBuf};
use std::time::Duration;

use staffdesk_client::net::api::ApiConfig;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "warn";

const STORE_DIR: &str = ".staffdesk";
const STORE_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no credential store path; set STAFFDESK_STORE or HOME")]
    NoStorePath,
    #[error("api url must start with http:// or https://, got `{0}`")]
    InvalidApiUrl(String),
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api: ApiConfig,
    pub store_path: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    /// Build settings from already-parsed flag values.
    ///
    /// `store` wins over the `$HOME/.staffdesk/session.json` default.
    pub fn resolve(
        api_url: &str,
        store: Option<PathBuf>,
        timeout_secs: u64,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let api_url = api_url.trim();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url.to_owned()));
        }
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let store_path = store
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| default_store_path(home))
            .ok_or(ConfigError::NoStorePath)?;

        Ok(Self { api: ApiConfig::new(api_url), store_path, timeout: Duration::from_secs(timeout_secs) })
    }
}

/// `<home>/.staffdesk/session.json`, when a home directory is known.
pub fn default_store_path(home: Option<&Path>) -> Option<PathBuf> {
    home.filter(|h| !h.as_os_str().is_empty())
        .map(|h| h.join(STORE_DIR).join(STORE_FILE))
}
