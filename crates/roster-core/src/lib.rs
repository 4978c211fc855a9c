//! Client-side data sync between `roster-api` and UI consumers (CLI / TUI).
//!
//! - **[`CollectionStore`]** owns the HTTP client and the current
//!   [`Snapshot`] of the remote collection. A successful
//!   [`refresh()`](CollectionStore::refresh) replaces the snapshot wholesale
//!   and notifies subscribers; create/update/delete only talk to the server.
//!
//! - **[`SnapshotStream`]** is the subscription handle vended by the store.
//!   It exposes `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`ViewController`]** is the two-state machine (`ListView` /
//!   `EditView`) that turns user intents into store calls, always following
//!   a successful mutation with exactly one refresh.
//!
//! - **Domain model** ([`model`]) holds [`Employee`], [`EmployeeFields`] and
//!   [`EditTarget`], with [`EmployeeId`] accepting numeric or string ids.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_API_URL, StoreConfig, TlsVerification};
pub use error::CoreError;
pub use model::{EditTarget, Employee, EmployeeFields, EmployeeId, RecordKey};
pub use store::{CollectionStore, Snapshot, SnapshotStream};
pub use view::{Intent, ViewController, ViewState};
