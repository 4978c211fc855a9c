// roster-api: Async Rust client for a REST employee collection resource

pub mod client;
mod employees;
pub mod error;
pub mod models;
pub mod transport;

pub use client::EmployeeClient;
pub use error::Error;
pub use models::{EmployeePayload, EmployeeRecord, RecordId};
pub use transport::{TlsMode, TransportConfig};
