// ── Domain model ──

pub mod employee;
pub mod id;

pub use employee::{EditTarget, Employee, EmployeeFields, RecordKey};
pub use id::EmployeeId;
