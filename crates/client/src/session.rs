//! Bearer-token cache.
//!
//! The host plugin stores the last successful login's token in a small
//! JSON file so a restarted session can skip interactive login while
//! the token is still valid. Credentials themselves are never written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk shape of the cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedToken {
    pub token: String,
    /// Phone number the token was issued to, for display only.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Reads and writes the token cache at a fixed path.
pub struct TokenCache {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write token cache {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode token cache: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached token, if a readable cache exists.
    ///
    /// A missing or corrupt file is not an error; the caller simply
    /// logs in again. Corruption is logged at WARN.
    pub fn load(&self) -> Option<CachedToken> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable token cache",
                );
                None
            }
        }
    }

    /// Persist a token, replacing any previous cache.
    pub fn save(&self, cached: &CachedToken) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(cached)?;
        std::fs::write(&self.path, raw).map_err(|source| SessionError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Drop the cache, e.g. after the server rejects the token.
    pub fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to clear token cache");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stylepanel-session-{name}-{}", std::process::id()))
    }

    #[test]
    fn save_then_load_round_trips() {
        let cache = TokenCache::new(temp_path("roundtrip"));
        cache.save(&CachedToken {
            token: "tok-123".into(),
            phone: Some("13800000000".into()),
        })
        .unwrap();

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.phone.as_deref(), Some("13800000000"));
        cache.clear();
        assert!(cache.load().is_none());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let cache = TokenCache::new(temp_path("missing"));
        assert!(cache.load().is_none());
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let cache = TokenCache::new(&path);
        assert!(cache.load().is_none());
        cache.clear();
    }

    #[test]
    fn clear_is_idempotent() {
        let cache = TokenCache::new(temp_path("clear-twice"));
        cache.clear();
        cache.clear();
    }
}
