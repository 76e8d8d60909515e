//! Tool configuration: bridge endpoint and design provisions.
//!
//! Loaded from an optional JSON file; missing fields take defaults and the
//! `FOOTINGX_BRIDGE_URL` / `FOOTINGX_TIMEOUT_SECS` environment variables
//! override the bridge settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::provisions::DesignProvisions;

/// Environment variable overriding [`BridgeConfig::url`].
pub const BRIDGE_URL_VAR: &str = "FOOTINGX_BRIDGE_URL";

/// Environment variable overriding [`BridgeConfig::timeout_secs`].
pub const TIMEOUT_VAR: &str = "FOOTINGX_TIMEOUT_SECS";

/// Where and how to reach the analysis host bridge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// JSON-RPC endpoint.
    pub url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8765/rpc".to_string(),
            // Analyses can take a while on large models.
            timeout_secs: 300,
            connect_timeout_secs: 2,
        }
    }
}

/// Complete tool configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bridge settings.
    pub bridge: BridgeConfig,
    /// Footing design constants.
    pub provisions: DesignProvisions,
}

impl Config {
    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] when the file is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Read the file if given, otherwise start from defaults, then apply the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file or an override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        log::debug!("configuration: {config:?}");
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] when the timeout is not an integer.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(BRIDGE_URL_VAR) {
            self.bridge.url = url;
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            self.bridge.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Environment {
                    name: TIMEOUT_VAR,
                    value,
                })?;
        }
        Ok(())
    }
}
