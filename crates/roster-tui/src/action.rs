//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use roster_core::{Employee, EmployeeFields, Snapshot, ViewState};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// A user intent forwarded to the view controller task.
#[derive(Debug, Clone)]
pub enum IntentRequest {
    Refresh,
    Add,
    Edit(Arc<Employee>),
    Cancel,
    Save(EmployeeFields),
    Delete(Arc<Employee>),
}

impl IntentRequest {
    /// Whether the request talks to the server.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Refresh | Self::Save(_) | Self::Delete(_))
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteEmployee(Arc<Employee>),
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteEmployee(employee) => write!(f, "Delete {}?", employee.display_name()),
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data Events (from roster-core subscriptions) ──────────────
    SnapshotUpdated(Snapshot),
    ViewChanged(ViewState),

    // ── Intents ───────────────────────────────────────────────────
    Intent(IntentRequest),
    /// A remote intent started (`true`) or finished (`false`).
    Busy(bool),
    /// Result of the last request that hit the server.
    Synced,
    SyncFailed(String),

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
