//! Configuration management for Alcove
//!
//! Environment-based configuration with defaults, TOML file support, and
//! validation. Environment variables follow the pattern `ALCOVE_<SECTION>_<KEY>`
//! and override both defaults and file contents.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash
    pub base_url: String,

    /// Per-request timeout. A hung request fails instead of pinning its
    /// caller forever.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Default page size for feed pagination
    pub page_limit: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include target module
    pub with_target: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout: Duration::from_secs(30),
            page_limit: 20,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_target: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Example: `ALCOVE_API_BASE_URL=https://api.example.com`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError(e.to_string()))?;

        let mut config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("ALCOVE_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = env::var("ALCOVE_API_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid request timeout: {}", e)))?;
            self.api.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(limit) = env::var("ALCOVE_API_PAGE_LIMIT") {
            self.api.page_limit = limit
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid page limit: {}", e)))?;
        }
        if let Ok(level) = env::var("ALCOVE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(json) = env::var("ALCOVE_LOG_JSON") {
            self.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON flag: {}", e)))?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "api.base_url must not be empty".to_string(),
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationFailed(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }

        if self.api.base_url.ends_with('/') {
            return Err(ConfigError::ValidationFailed(
                "api.base_url must not end with a slash".to_string(),
            ));
        }

        if self.api.page_limit == 0 {
            return Err(ConfigError::ValidationFailed(
                "api.page_limit must be greater than 0".to_string(),
            ));
        }

        if self.api.request_timeout.is_zero() {
            return Err(ConfigError::ValidationFailed(
                "api.request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.page_limit, 20);
        assert_eq!(config.api.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_trailing_slash() {
        let mut config = Config::default();
        config.api.base_url = "http://localhost:3000/".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = Config::default();
        config.api.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_page_limit() {
        let mut config = Config::default();
        config.api.page_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://api.example.com"
request_timeout = "10s"
page_limit = 50

[logging]
level = "debug"
json_format = true
with_target = false
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.request_timeout, Duration::from_secs(10));
        assert_eq!(config.api.page_limit, 50);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let restored: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(restored.api.base_url, config.api.base_url);
        assert_eq!(restored.api.request_timeout, config.api.request_timeout);
    }
}
