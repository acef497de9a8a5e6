// docscout - terminal browser for a local document collection
//
// Architecture:
// - TUI (ratatui): file selector, markdown content, history, query input
// - App state machine: pure update(event) -> commands
// - Scheduler (tokio): runs commands in the background, each yielding one event
// - Pipeline: directory snapshot + sequential embedding requests (reqwest)
// - Event system: a single unbounded mpsc queue feeds the app

mod cli;
mod config;
mod events;
mod logging;
mod pipeline;
mod scheduler;
mod theme;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use std::panic;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> Result<()> {
    // Handle subcommands first (config --show, --path)
    if cli::handle_command(&cli)? {
        return Ok(());
    }

    let config = Config::load(&cli.overrides()).context("Failed to load configuration")?;
    let content = config.load_content()?;

    // Logs go to the buffer, never to stdout, so they cannot garble the display
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config.logging, &log_buffer);

    tracing::info!(
        version = config::VERSION,
        embed_url = %config.embed_url,
        "Starting docscout"
    );

    // Restore the terminal before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore_terminal();
        original_hook(panic_info);
    }));

    tui::run_tui(config, content, log_buffer).await
}

/// Install the global subscriber
///
/// Precedence: RUST_LOG env var > config file > default "info". The returned
/// guard must be kept alive for file logs to flush.
fn init_tracing(logging: &LoggingConfig, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("docscout={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let file_appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };

                // Writes happen on a background thread
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(file_layer)
        .init();

    guard
}
