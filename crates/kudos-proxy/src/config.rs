//! Configuration file parsing for the proxy.
//!
//! Loads settings from TOML files: bind address, the Places API key and the
//! upstream base URL. The API key may also come from the environment.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the Places API key
pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// Legacy variable name, checked when [`API_KEY_ENV`] is unset
pub const LEGACY_API_KEY_ENV: &str = "VITE_GOOGLE_PLACES_API_KEY";

/// Proxy configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field is present but unusable
    #[error("Invalid configuration field {field}: {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Proxy configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8888)
    pub bind_port: u16,

    /// Places API key; falls back to the environment when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Places API
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,

    /// Upstream request timeout; unset leaves the HTTP client's default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

impl ProxyConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ProxyConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration for local use
    pub fn default_test_config() -> Self {
        ProxyConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8888,
            api_key: None,
            places_base_url: default_places_base_url(),
            request_timeout_secs: None,
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// API key from the config file, else from the process environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// API key from the config file, else from `lookup`
    ///
    /// Empty values count as unset at every step.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| lookup(API_KEY_ENV).filter(|k| !k.is_empty()))
            .or_else(|| lookup(LEGACY_API_KEY_ENV).filter(|k| !k.is_empty()))
    }

    /// Upstream request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidField {
                field: "request_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let base = &self.places_base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidField {
                field: "places_base_url".to_string(),
                reason: format!("expected an http(s) URL, got '{}'", base),
            });
        }
        Ok(())
    }
}
