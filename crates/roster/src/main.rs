mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roster_core::{CollectionStore, ViewController};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "roster", &mut std::io::stdout());
            Ok(())
        }

        // Config commands don't need the employee service
        Command::Config(args) => {
            let cfg = config::effective_config(&cli.global)?;
            config::apply_display_defaults(&mut cli.global, &cfg);
            commands::config_cmd::handle(args, &cli.global)
        }

        // All other commands go through the view controller
        cmd => {
            let cfg = config::effective_config(&cli.global)?;
            config::apply_display_defaults(&mut cli.global, &cfg);
            let store_config = config::to_store_config(&cfg)?;

            tracing::debug!(url = %store_config.api_url, "using employee service");
            let store = Arc::new(CollectionStore::new(&store_config)?);
            let mut view = ViewController::new(store);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut view, &cli.global).await
        }
    }
}
