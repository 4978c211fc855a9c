// ── Runtime store configuration ──
//
// These types describe *where* the collection lives and how to reach it.
// They never touch disk: the CLI/TUI builds a `StoreConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use roster_api::{TlsMode, TransportConfig};
use url::Url;

/// Collection URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/employees";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs on development servers).
    DangerAcceptInvalid,
}

/// Configuration for one collection store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Collection URL (e.g., `http://localhost:5000/employees`).
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            ..Self::default()
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            tls: TlsVerification::SystemDefaults,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The parsed `DEFAULT_API_URL`.
pub fn default_api_url() -> Url {
    // Constant input; parsing cannot fail.
    Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("DEFAULT_API_URL is valid"))
}
