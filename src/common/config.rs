//! Configuration file handling
//!
//! The harness reads an optional TOML file for its own settings and scans
//! the frontend deployment env file for the backend URL, falling back to a
//! fixed local address.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where the system under test lives
    #[serde(default)]
    pub target: TargetConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Location of the system under test
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// Explicit base URL; wins over the env file when set
    pub base_url: Option<String>,

    /// Deployment env file scanned for the base URL
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Key looked up in the env file
    #[serde(default = "default_env_key")]
    pub env_key: String,

    /// Path prefix appended to the base URL for every API call
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Used when neither `base_url` nor the env file yield a value
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            env_file: default_env_file(),
            env_key: default_env_key(),
            api_prefix: default_api_prefix(),
            fallback_url: default_fallback_url(),
        }
    }
}

fn default_env_file() -> PathBuf {
    PathBuf::from("/app/frontend/.env")
}
fn default_env_key() -> String {
    "REACT_APP_BACKEND_URL".to_string()
}
fn default_api_prefix() -> String {
    "/api".to_string()
}
fn default_fallback_url() -> String {
    "http://localhost:8001".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Per-request timeout; a request that exceeds it is a transport failure
    #[serde(default = "default_request")]
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: default_request(),
        }
    }
}

fn default_request() -> u64 {
    10
}

impl Timeouts {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve the backend base URL
    ///
    /// Precedence: explicit `base_url`, then the env file entry, then the
    /// fallback. The result has no trailing slash and must be an absolute
    /// http(s) URL.
    pub fn base_url(&self) -> Result<String> {
        let raw = self
            .target
            .base_url
            .clone()
            .or_else(|| read_env_value(&self.target.env_file, &self.target.env_key))
            .unwrap_or_else(|| self.target.fallback_url.clone());

        let trimmed = raw.trim().trim_end_matches('/').to_string();
        let parsed = reqwest::Url::parse(&trimmed).map_err(|e| Error::invalid_base_url(&trimmed, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_base_url(
                &trimmed,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        Ok(trimmed)
    }

    /// The API root every call path is appended to
    pub fn api_url(&self, base_url: &str) -> String {
        let prefix = self.target.api_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            base_url.to_string()
        } else if prefix.starts_with('/') {
            format!("{}{}", base_url, prefix)
        } else {
            format!("{}/{}", base_url, prefix)
        }
    }
}

/// Read `key=value` from an env-style file
///
/// Returns the value of the first line starting with `key=`. An unreadable
/// file or a missing key yields `None`.
pub fn read_env_value(path: &Path, key: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let prefix = format!("{}=", key);
    content
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
