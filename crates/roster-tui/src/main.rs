//! `roster-tui` — interactive terminal client for an employee directory.
//!
//! Built on [ratatui](https://ratatui.rs) over `roster-core`'s
//! [`ViewController`](roster_core::ViewController). The list screen shows
//! the latest snapshot of the collection; the form screen is shared by add
//! and edit, and which one is visible follows the controller's view state.
//!
//! Logs are written to a file (default `/tmp/roster-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::{CollectionStore, StoreConfig, ViewController};

use crate::app::App;

/// Terminal UI for browsing and editing an employee directory.
#[derive(Parser, Debug)]
#[command(name = "roster-tui", version, about)]
struct Cli {
    /// Employee collection URL (e.g., http://localhost:5000/employees)
    #[arg(short = 'u', long, env = "ROSTER_API_URL")]
    api_url: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/roster-tui.log)
    #[arg(long, default_value = "/tmp/roster-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the terminal is in raw mode. The returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("roster_tui={log_level},roster_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("roster-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the store config: flags over env over the shared config file.
fn resolve_store_config(cli: &Cli) -> Result<StoreConfig> {
    let mut cfg = roster_config::load_config()?;
    if let Some(ref url) = cli.api_url {
        cfg.api_url.clone_from(url);
    }
    if let Some(timeout) = cli.timeout {
        cfg.timeout = timeout;
    }
    if cli.insecure {
        cfg.insecure = true;
    }
    Ok(roster_config::to_store_config(&cfg)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks(&cli.log_file)?;

    let _log_guard = setup_tracing(&cli);

    // Bad config is reported before the terminal is taken over
    let store_config = resolve_store_config(&cli)?;
    info!(url = %store_config.api_url, "starting roster-tui");

    let store = std::sync::Arc::new(CollectionStore::new(&store_config)?);
    let view = ViewController::new(store);

    let mut app = App::new(view);
    app.run().await?;

    Ok(())
}
