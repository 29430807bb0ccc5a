//! Configuration Module
//!
//! Cache policy settings and the runtime configuration of the demo binary.

use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Default sliding expiration in seconds
pub const DEFAULT_DURATION_SECS: i16 = 30;

/// Section name conventionally holding the cache settings in a JSON document
pub const SETTINGS_SECTION: &str = "CacheSetting";

fn default_enabled() -> bool {
    true
}

fn default_duration() -> i16 {
    DEFAULT_DURATION_SECS
}

// == Cache Settings ==
/// Policy defaults applied by a [`CacheManager`](crate::cache::CacheManager).
///
/// Handed to the manager at construction and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheSettings {
    /// Global on/off switch
    #[serde(default = "default_enabled", alias = "Enabled")]
    pub enabled: bool,
    /// Default sliding expiration in seconds; zero or negative means unset
    #[serde(default = "default_duration", alias = "Duration")]
    pub duration: i16,
}

impl CacheSettings {
    pub fn new(enabled: bool, duration: i16) -> Self {
        Self { enabled, duration }
    }

    /// Loads settings from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Enable caching (default: true)
    /// - `CACHE_DURATION` - Default sliding expiration in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_enabled),
            duration: env::var("CACHE_DURATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_duration),
        }
    }

    /// Binds the named section of a JSON configuration document.
    ///
    /// A missing section yields the defaults. A document that is not valid
    /// JSON, or a section that does not describe settings, is an error.
    pub fn from_json_section(document: &str, section: &str) -> Result<Self> {
        let root: serde_json::Value = serde_json::from_str(document)
            .map_err(|e| CacheError::InvalidConfig(e.to_string()))?;

        match root.get(section) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| CacheError::InvalidConfig(format!("section '{}': {}", section, e))),
            None => Ok(Self::default()),
        }
    }

    /// Sliding window used when a caller leaves the duration unset.
    ///
    /// A non-positive configured duration falls back to 30 seconds.
    pub fn default_duration(&self) -> Duration {
        let secs = if self.duration > 0 {
            self.duration
        } else {
            DEFAULT_DURATION_SECS
        };
        Duration::from_secs(secs as u64)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            duration: default_duration(),
        }
    }
}

// == Runtime Config ==
/// Runtime configuration for the demo binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache policy settings
    pub settings: CacheSettings,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Loads the configuration from environment variables.
    ///
    /// Cache settings come from [`CacheSettings::from_env`]; the sweep
    /// interval from `CLEANUP_INTERVAL` (default: 1).
    pub fn from_env() -> Self {
        Self {
            settings: CacheSettings::from_env(),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: CacheSettings::default(),
            cleanup_interval: 1,
        }
    }
}
