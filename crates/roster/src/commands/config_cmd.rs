//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn to_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Config {
        message: e.to_string(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::effective_config(global)?;
            let toml = to_toml(&cfg)?;
            let out = output::render_single(
                global.format(),
                &cfg,
                |_| toml.trim_end().to_owned(),
                |c| c.api_url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init => {
            let path = config::config_path();
            let mut cfg = config::effective_config(global)?;

            if path.exists()
                && !global.yes
                && !Confirm::new()
                    .with_prompt(format!("{} exists. Overwrite?", path.display()))
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?
            {
                output::notice("Aborted", global.colored(), global.quiet);
                return Ok(());
            }

            if !global.yes {
                eprintln!("Config path: {}\n", path.display());
                cfg.api_url = Input::new()
                    .with_prompt("Employee collection URL")
                    .default(cfg.api_url.clone())
                    .interact_text()
                    .map_err(prompt_err)?;
                cfg.insecure = Confirm::new()
                    .with_prompt("Accept invalid TLS certificates?")
                    .default(cfg.insecure)
                    .interact()
                    .map_err(prompt_err)?;
            }

            // Refuse to write a file the next run could not use.
            config::to_store_config(&cfg)?;

            let written = config::save_config(&cfg)?;
            output::success(
                &format!("Wrote {}", written.display()),
                global.colored(),
                global.quiet,
            );
            Ok(())
        }
    }
}
