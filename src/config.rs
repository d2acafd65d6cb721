use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ArchiveError;

/// Configuration for the page archiver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiverConfig {
    /// User-Agent header sent with every page and image request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout in seconds for page fetches
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Timeout in seconds for individual image downloads
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,

    /// Pause in milliseconds before each page fetch
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Length of the random suffix appended to image filenames
    #[serde(default = "default_suffix_length")]
    pub suffix_length: usize,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            image_timeout_secs: default_image_timeout_secs(),
            throttle_ms: default_throttle_ms(),
            suffix_length: default_suffix_length(),
        }
    }
}

impl ArchiverConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| ArchiveError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        serde_json::from_str(json).map_err(|e| ArchiveError::Config(e.to_string()))
    }
}

/// Default User-Agent for outgoing requests
fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

/// Default page fetch timeout
fn default_fetch_timeout_secs() -> u64 {
    10
}

/// Default image download timeout
fn default_image_timeout_secs() -> u64 {
    10
}

/// Default pause between successive page fetches
fn default_throttle_ms() -> u64 {
    1000
}

/// Default random suffix length for image filenames
fn default_suffix_length() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArchiverConfig::default();
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.image_timeout_secs, 10);
        assert_eq!(config.throttle_ms, 1000);
        assert_eq!(config.suffix_length, 5);
    }

    #[test]
    fn test_from_json_partial() {
        // Missing fields fall back to defaults
        let config = ArchiverConfig::from_json(r#"{"throttle_ms": 250}"#).unwrap();
        assert_eq!(config.throttle_ms, 250);
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = ArchiverConfig::from_json("not json");
        assert!(matches!(result, Err(ArchiveError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"user_agent": "webvault/0.1", "suffix_length": 8}"#).unwrap();

        let config = ArchiverConfig::from_file(&path).unwrap();
        assert_eq!(config.user_agent, "webvault/0.1");
        assert_eq!(config.suffix_length, 8);
    }
}
