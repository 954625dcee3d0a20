//! Configuration management for gocook
//!
//! Settings are read from environment variables with sensible defaults, so a
//! Dockerfile can tune the tool without changing its command line.
//!
//! # Environment Variables
//!
//! - `GOCOOK_GO_BINARY`: Go executable used by `--cook` - default: "go"
//! - `GOCOOK_LOG_LEVEL`: Logging level - default: "info"
//! - `GOCOOK_LOG_JSON`: Emit JSON log lines (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use gocook::GocookConfig;
//!
//! let config = GocookConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("building with {}", config.go_binary);
//! ```

use crate::cook::CookOptions;
use std::env;
use thiserror::Error;

const DEFAULT_GO_BINARY: &str = "go";
const DEFAULT_LOG_LEVEL: &str = "info";

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Go binary must not be empty. Unset GOCOOK_GO_BINARY or point it at a go executable")]
    EmptyGoBinary,

    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GocookConfig {
    /// Executable invoked as `<go_binary> build ...`
    pub go_binary: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,
}

impl Default for GocookConfig {
    /// Loads from `GOCOOK_*` environment variables, falling back to defaults.
    fn default() -> Self {
        let go_binary =
            env::var("GOCOOK_GO_BINARY").unwrap_or_else(|_| DEFAULT_GO_BINARY.to_string());

        let log_level =
            env::var("GOCOOK_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        let log_json = env::var("GOCOOK_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            go_binary,
            log_level,
            log_json,
        }
    }
}

impl GocookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.go_binary.trim().is_empty() {
            return Err(ConfigError::EmptyGoBinary);
        }
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }

    pub fn cook_options(&self, tags: Option<&str>) -> CookOptions {
        CookOptions {
            go_binary: self.go_binary.clone().into(),
            tags: tags.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }
}
