// Wire types for the employee collection resource.
//
// Field names follow the resource's camelCase JSON. These types are raw:
// `roster-core` converts them into its canonical domain model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier, exactly as it appears on the wire.
///
/// Collection servers differ in whether they hand out numeric or string ids.
/// Any JSON number is accepted (negative, fractional or past `u64`), and
/// both forms are kept verbatim so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A record as returned by `GET {base}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: RecordId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// Request body for `POST {base}` and `PUT {base}/{id}`.
///
/// `id` is omitted on create; the server assigns it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a RecordId>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}
