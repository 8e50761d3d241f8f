//! CLI argument definitions using clap
//!
//! Commands:
//! - gradebook init-db [--config <path>]
//! - gradebook seed [--config <path>]
//! - gradebook serve [--config <path>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gradebook - student and grade tracking backend
#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or upgrade the database schema
    InitDb {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load the fixture student with one grade per subject
    Seed {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
