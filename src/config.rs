//! Link configuration.
//!
//! Timing and limits for the engine, read from a TOML file:
//!
//! ```toml
//! timeout_secs = 30
//! poll_interval_ms = 300
//! max_request_len = 255
//! ```
//!
//! Missing keys take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::{DEFAULT_MAX_VALUE_LEN, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};

/// Engine timing and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Session timeout in seconds.
    pub timeout_secs: u64,
    /// Interval between status polls in milliseconds.
    pub poll_interval_ms: u64,
    /// Longest question accepted, in chars.
    pub max_request_len: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            max_request_len: DEFAULT_MAX_VALUE_LEN,
        }
    }
}

impl LinkConfig {
    /// Session timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Default config file location (`<config dir>/slotlink/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("slotlink").join("config.toml"))
    }

    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist. A file that exists but fails to parse is an error.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
