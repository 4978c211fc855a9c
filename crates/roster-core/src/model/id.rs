// ── Employee identity ──
//
// The server assigns ids, and different collection servers hand out either
// JSON numbers or opaque strings. EmployeeId keeps whichever form arrived so
// it can be sent back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EmployeeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<u64> for EmployeeId {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<String> for EmployeeId {
    /// Numbers in their canonical JSON form become numeric ids; anything else
    /// (including `"007"`) stays textual so its exact form survives.
    fn from(s: String) -> Self {
        match s.parse::<serde_json::Number>() {
            Ok(n) if n.to_string() == s => Self::Number(n),
            _ => Self::Text(s),
        }
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}
