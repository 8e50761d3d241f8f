//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use thiserror::Error;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Database open, migrate or seed failure
    DatabaseError,
    /// Runtime or listener failure
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "GRADEBOOK_CLI_CONFIG_ERROR",
            Self::DatabaseError => "GRADEBOOK_CLI_DATABASE_ERROR",
            Self::ServeFailed => "GRADEBOOK_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {}", .code.code(), .message)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Database error
    pub fn database_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DatabaseError, msg)
    }

    /// Serve failed
    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::database_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("missing file");
        assert_eq!(err.to_string(), "GRADEBOOK_CLI_CONFIG_ERROR: missing file");
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }

    #[test]
    fn test_store_error_maps_to_database_code() {
        let err = CliError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.code(), CliErrorCode::DatabaseError);
    }
}
