//! Client configuration loaded from environment variables.

use std::path::PathBuf;

/// Configuration for [`crate::api::StyleApi`].
///
/// All fields have defaults suitable for local development; override
/// via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the generation service.
    pub base_url: String,
    /// Per-request HTTP timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Optional path of the JSON token cache.
    pub token_cache: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `STYLEPANEL_API_URL`      | `http://localhost:8080`  |
    /// | `STYLEPANEL_TIMEOUT_SECS` | `30`                     |
    /// | `STYLEPANEL_TOKEN_CACHE`  | unset (no cache)         |
    pub fn from_env() -> Self {
        let base_url = std::env::var("STYLEPANEL_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into());

        let request_timeout_secs: u64 = std::env::var("STYLEPANEL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("STYLEPANEL_TIMEOUT_SECS must be a valid u64");

        let token_cache = std::env::var("STYLEPANEL_TOKEN_CACHE")
            .ok()
            .map(PathBuf::from);

        Self {
            base_url,
            request_timeout_secs,
            token_cache,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            request_timeout_secs: 30,
            token_cache: None,
        }
    }
}
