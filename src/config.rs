//! Configuration management.
//!
//! Config stored at: `<config dir>/repairscope/config.json`.
//! Every field has a default, so a missing file or a partial file is fine.
//! Environment variables override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_API_KEY: &str = "GOOGLE_PLACES_API_KEY";
pub const ENV_TIMEOUT: &str = "REPAIRSCOPE_TIMEOUT_SECS";

/// Upper bound on the per-request timeout, whatever the file or env says.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Google Places API key. Without one every provider call falls back.
    pub google_api_key: Option<String>,

    /// Deadline for each outbound provider request.
    pub request_timeout_secs: u64,

    /// Nearby-search radius for repair shops.
    pub search_radius_meters: u32,

    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            request_timeout_secs: 10,
            // About five miles.
            search_radius_meters: 8047,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// `<config dir>/repairscope/config.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("repairscope").join("config.json"))
    }

    /// Load from the default path (or defaults), then apply the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup. Unparsable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.google_api_key = Some(key);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT).and_then(|v| v.trim().parse().ok()) {
            self.request_timeout_secs = secs;
        }
        self
    }

    /// Request deadline, between one second and `MAX_REQUEST_TIMEOUT_SECS`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.clamp(1, MAX_REQUEST_TIMEOUT_SECS))
    }
}
