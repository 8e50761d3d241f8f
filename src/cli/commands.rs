//! CLI command implementations
//!
//! Each command resolves configuration, installs logging, opens the database
//! pool and applies migrations before doing its own work.

use std::path::Path;

use sqlx::SqlitePool;
use tokio::runtime::Runtime;
use tracing::info;

use crate::http_server::HttpServer;
use crate::observability;
use crate::service::GradebookService;
use crate::store::db;

use super::args::{Cli, Command};
use super::config::GradebookConfig;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::InitDb { config } => init_db(config.as_deref()),
        Command::Seed { config } => seed(config.as_deref()),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))
}

fn prepare(config_path: Option<&Path>) -> CliResult<GradebookConfig> {
    let config = GradebookConfig::resolve(config_path)?;
    observability::init_logging(&config.log_filter);
    Ok(config)
}

async fn open_database(config: &GradebookConfig) -> CliResult<SqlitePool> {
    let pool = db::connect(&config.database.url, config.database.max_connections).await?;
    db::init_db(&pool).await?;
    Ok(pool)
}

/// Create or upgrade the schema
pub fn init_db(config_path: Option<&Path>) -> CliResult<()> {
    let config = prepare(config_path)?;

    runtime()?.block_on(async {
        let pool = open_database(&config).await?;
        pool.close().await;
        Ok::<(), CliError>(())
    })
}

/// Load the fixture student and grades
pub fn seed(config_path: Option<&Path>) -> CliResult<()> {
    let config = prepare(config_path)?;

    runtime()?.block_on(async {
        let pool = open_database(&config).await?;
        let student = db::seed(&pool).await?;
        info!(
            student_id = student.id,
            name = %student.full_name(),
            "fixture student ready"
        );
        pool.close().await;
        Ok::<(), CliError>(())
    })
}

/// Migrate the database and serve HTTP until the process exits
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = prepare(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    runtime()?.block_on(async {
        let pool = open_database(&config).await?;
        let server = HttpServer::with_config(config.server.clone(), GradebookService::new(pool));

        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
