// ── Core error types ──
//
// User-facing errors from roster-core. Consumers never see raw HTTP or JSON
// failures: the `From<roster_api::Error>` impl translates transport-layer
// errors into these variants.

use thiserror::Error;

use crate::view::Intent;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach employee service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Remote errors ────────────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Employee not found: {identifier}")]
    NotFound { identifier: String },

    // ── Local rejections ─────────────────────────────────────────────
    #[error("Required fields are blank: {}", .fields.join(", "))]
    ValidationFailed { fields: Vec<String> },

    #[error("Cannot {intent} while in {state}")]
    IntentRejected { intent: Intent, state: &'static str },

    // ── Partial success ──────────────────────────────────────────────
    /// The mutation was applied remotely but the follow-up refresh failed,
    /// so the snapshot may be stale.
    #[error("{mutation} succeeded but the list could not be refreshed: {source}")]
    RefreshAfterMutation {
        mutation: Intent,
        #[source]
        source: Box<CoreError>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// `true` for failures that came from talking to the server, `false` for
    /// requests rejected locally before anything was sent.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout { .. }
                | Self::Api { .. }
                | Self::NotFound { .. }
                | Self::RefreshAfterMutation { .. }
        )
    }

    /// HTTP status code, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            Self::RefreshAfterMutation { source, .. } => source.status(),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<roster_api::Error> for CoreError {
    fn from(err: roster_api::Error) -> Self {
        match err {
            roster_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            roster_api::Error::Status { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            roster_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Not a collection URL: {url}"),
            },
            roster_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            roster_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_become_api_errors() {
        let err = CoreError::from(roster_api::Error::Status {
            status: 500,
            body: "boom".into(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
        assert_eq!(err.to_string(), "API error: HTTP 500: boom");
        assert!(err.is_transport());
    }

    #[test]
    fn local_rejections_are_not_transport() {
        let err = CoreError::IntentRejected {
            intent: Intent::Save,
            state: "list view",
        };
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Cannot save while in list view");

        let err = CoreError::ValidationFailed {
            fields: vec!["First Name".into(), "Email".into()],
        };
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Required fields are blank: First Name, Email");
    }

    #[test]
    fn unaddressable_base_url_is_a_config_error() {
        let err = CoreError::from(roster_api::Error::InvalidBaseUrl("mailto:hr@x.com".into()));
        assert!(matches!(err, CoreError::Config { .. }));
        assert!(!err.is_transport());
    }

    #[test]
    fn refresh_after_mutation_keeps_source() {
        let err = CoreError::RefreshAfterMutation {
            mutation: Intent::Delete,
            source: Box::new(CoreError::Api {
                message: "HTTP 502".into(),
                status: Some(502),
            }),
        };
        assert_eq!(err.status(), Some(502));
        assert!(std::error::Error::source(&err).is_some());
    }
}
