//! CLI configuration: a thin wrapper around `roster_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --timeout, etc.).

use clap::ValueEnum;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use roster_config::{Config, config_path, load_config, save_config, to_store_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Load config from file + env, then apply flag overrides.
///
/// Flags beat environment, environment beats the file.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config()?;
    if let Some(ref url) = global.api_url {
        cfg.api_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
    Ok(cfg)
}

/// Fill output and color from config where no flag was given.
///
/// Unknown values in the file fall back to the built-in defaults.
pub fn apply_display_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.output, true).ok();
    }
    if global.color == ColorMode::Auto {
        if let Ok(mode) = ColorMode::from_str(&cfg.color, true) {
            global.color = mode;
        }
    }
}

impl GlobalOpts {
    /// The resolved output format.
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    /// Whether status lines on stderr should be colored.
    pub fn colored(&self) -> bool {
        crate::output::should_color(self.color)
    }
}
