//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

/// Log filter used when neither `RUST_LOG` nor `TILL_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,till=info";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Name shown above the menu
    pub store_name: String,

    /// JSON catalog to load instead of the demo store
    pub catalog_path: Option<PathBuf>,

    /// Clear the terminal between screens
    pub clear_screen: bool,

    /// Fallback `EnvFilter` directives when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            store_name: "Best Buy".to_string(),
            catalog_path: None,
            clear_screen: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `load` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = CliConfig::default();

        let store_name = lookup("TILL_STORE_NAME").unwrap_or(defaults.store_name);
        if store_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("TILL_STORE_NAME".to_string()));
        }

        let catalog_path = lookup("TILL_CATALOG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let clear_screen = match lookup("TILL_CLEAR_SCREEN") {
            Some(value) => parse_flag(&value)
                .ok_or_else(|| ConfigError::InvalidValue("TILL_CLEAR_SCREEN".to_string()))?,
            None => defaults.clear_screen,
        };

        let log_filter = lookup("TILL_LOG").unwrap_or(defaults.log_filter);

        Ok(CliConfig {
            store_name,
            catalog_path,
            clear_screen,
            log_filter,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
