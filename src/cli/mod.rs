//! CLI module for the gradebook
//!
//! Provides command-line interface for:
//! - init-db: Create or upgrade the schema
//! - seed: Load the fixture student and grades
//! - serve: Migrate and run the HTTP server

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init_db, run, run_command, seed, serve};
pub use config::{DatabaseConfig, GradebookConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
