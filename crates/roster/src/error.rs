//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use roster_config::ConfigError;
use roster_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the employee service at {url}")]
    #[diagnostic(
        code(roster::connection_failed),
        help(
            "Check that the service is running and accessible.\n\
             Set the URL with --api-url or `api_url` in the config file."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(roster::timeout),
        help("Increase the timeout with --timeout or check the service's responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Employee '{identifier}' not found")]
    #[diagnostic(
        code(roster::not_found),
        help("Run: roster list to see available employees")
    )]
    NotFound { identifier: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(roster::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("{mutation} succeeded, but the employee list could not be refreshed")]
    #[diagnostic(
        code(roster::stale_list),
        help("The change was saved. Run: roster list to fetch the current list.")
    )]
    StaleList {
        mutation: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(roster::validation))]
    Validation { field: String, reason: String },

    #[error("Required fields are blank: {fields}")]
    #[diagnostic(
        code(roster::missing_fields),
        help("First name, last name and email are all required.")
    )]
    MissingFields { fields: String },

    #[error("{message}")]
    #[diagnostic(code(roster::rejected))]
    Rejected { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(roster::config),
        help("Inspect the file with: roster config show")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(roster::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON output: {0}")]
    #[diagnostic(code(roster::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML output: {0}")]
    #[diagnostic(code(roster::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(roster::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::MissingFields { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound { identifier } => CliError::NotFound { identifier },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::ValidationFailed { fields } => CliError::MissingFields {
                fields: fields.join(", "),
            },

            err @ CoreError::IntentRejected { .. } => CliError::Rejected {
                message: err.to_string(),
            },

            CoreError::RefreshAfterMutation { mutation, source } => CliError::StaleList {
                mutation: capitalize(&mutation.to_string()),
                source,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "api_url".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use roster_core::Intent;

    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let not_found = CliError::from(CoreError::NotFound {
            identifier: "9".into(),
        });
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let conn = CliError::from(CoreError::ConnectionFailed {
            url: "http://localhost:5000/employees".into(),
            reason: "refused".into(),
        });
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 3 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let blank = CliError::from(CoreError::ValidationFailed {
            fields: vec!["Email".into()],
        });
        assert_eq!(blank.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn stale_list_names_the_mutation() {
        let err = CliError::from(CoreError::RefreshAfterMutation {
            mutation: Intent::Delete,
            source: Box::new(CoreError::Timeout { timeout_secs: 30 }),
        });
        assert_eq!(
            err.to_string(),
            "Delete succeeded, but the employee list could not be refreshed"
        );
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
