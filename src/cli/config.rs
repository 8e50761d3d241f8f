//! Gradebook configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so a missing
//! `--config` runs with defaults. `DATABASE_URL` overrides `database.url`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::DEFAULT_LOG_FILTER;

use super::errors::{CliError, CliResult};

/// Environment variable overriding `database.url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL (default: "sqlite://gradebook.db?mode=rwc")
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Pool size for file databases (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    "sqlite://gradebook.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            database: DatabaseConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl GradebookConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: GradebookConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise, then apply the
    /// environment override
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            config.database.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(CliError::config_error("database.url must not be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(CliError::config_error("database.max_connections must be > 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        Ok(())
    }
}
