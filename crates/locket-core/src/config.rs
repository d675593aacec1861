//! Backend connection settings.

use serde::{Deserialize, Serialize};

/// Default backend origin, including the mounted auth prefix.
const DEFAULT_BASE_URL: &str = "https://backend-assignment-7skl.onrender.com/api/auth";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the account backend.
///
/// Loaded from `config.toml` by the infrastructure layer; defaults point at
/// the hosted deployment so a missing config file still yields a working
/// client.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Backend origin all endpoint paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Resolves an endpoint path against the configured origin.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
