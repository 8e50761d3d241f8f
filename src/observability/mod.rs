//! Logging setup
//!
//! Structured logs go through `tracing`. The subscriber is installed once by
//! the CLI; library code only emits events.
//!
//! # Usage
//!
//! ```ignore
//! use gradebook::observability;
//!
//! observability::init_logging("info,sqlx=warn");
//! tracing::info!(student_id = 1, "student created");
//! ```

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor configuration provides one
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

/// Build the filter: `RUST_LOG` wins over the configured directive
pub fn env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber
///
/// Returns false if one was already installed. Logging failure never stops
/// the server.
pub fn init_logging(configured: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(configured))
        .with_target(false)
        .try_init()
        .is_ok()
}
