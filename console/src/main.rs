//! `vnl`: interactive console for managing a volleyball league database.
//!
//! On start the binary resolves its configuration, opens (and migrates) the
//! SQLite database, seeds the demo rows into an empty database and then runs
//! the menu on stdin/stdout until the user exits or input closes. Logs go to
//! a daily rolling file so they never interleave with the prompts.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod persistence;
mod service;

use persistence::sqlite::{seed_if_empty, Database};
use service::{run_main_menu, ConsoleError, Prompt};

#[derive(Parser)]
#[command(name = "vnl", about = "Volleyball Nations League console manager")]
struct Cli {
    /// Properties file with the database settings (overrides VNL_CONFIG).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database URL, e.g. `sqlite://league.db`. Overrides the config file.
    #[arg(short, long)]
    database: Option<String>,

    /// Directory for the rolling log files.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

/// Daily rolling log file in `log_dir`, created if missing.
fn log_file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("vnl")
        .build(log_dir)
        .with_context(|| format!("cannot open log files in {}", log_dir.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_appender = log_file_appender(&cli.log_dir)?;
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("League console starting up");

    let config_path = config::resolve_config_path(cli.config, std::env::var("VNL_CONFIG").ok());
    let mut db_config = config::load_database_config(&config_path, &config::get_data_dir())
        .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;
    if let Some(url) = cli.database {
        db_config.url = url;
    }
    tracing::info!(config = ?db_config, "Resolved database settings");

    let db = Database::open(&db_config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Cannot open the database"))?;

    let seeded = seed_if_empty(&db).await;
    if seeded > 0 {
        tracing::info!(rows = seeded, "Seeded demo data");
    }

    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
    let outcome = run_main_menu(&db, &mut prompt).await;
    db.close().await;

    match outcome {
        Ok(()) => {}
        Err(ConsoleError::InputClosed) => tracing::info!("Input closed, leaving"),
        Err(e) => {
            tracing::error!(error = %e, "Console failed");
            return Err(e.into());
        }
    }

    tracing::info!("League console shutting down");
    Ok(())
}
