// ── Employee domain types ──
//
// Canonical records as the front ends see them. A record that has not been
// saved yet has no id at all, rather than an empty or sentinel one: that
// distinction is carried by `RecordKey`.

use serde::{Deserialize, Serialize};

use super::id::EmployeeId;

/// The user-editable part of an employee record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EmployeeFields {
    /// All-empty fields, the starting point of a new record.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Labels of required fields that are empty or whitespace-only.
    ///
    /// Only presence is checked. Email format is left to the server.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("First Name", &self.first_name),
            ("Last Name", &self.last_name),
            ("Email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// A persisted employee: server id plus fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub fields: EmployeeFields,
}

impl Employee {
    pub fn new(id: impl Into<EmployeeId>, fields: EmployeeFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// "First Last", for confirmations and log lines.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.fields.first_name, self.fields.last_name)
    }
}

/// Which record an edit form is working on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Not yet saved; the server will assign an id on create.
    Draft,
    /// An existing record.
    Persisted(EmployeeId),
}

/// The single record currently open in the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub key: RecordKey,
    pub fields: EmployeeFields,
}

impl EditTarget {
    /// A blank draft for "add".
    pub fn draft() -> Self {
        Self {
            key: RecordKey::Draft,
            fields: EmployeeFields::blank(),
        }
    }

    pub fn is_draft(&self) -> bool {
        self.key == RecordKey::Draft
    }

    /// Form title for this target.
    pub fn title(&self) -> &'static str {
        match self.key {
            RecordKey::Draft => "Add Employee",
            RecordKey::Persisted(_) => "Edit Employee",
        }
    }
}

impl From<&Employee> for EditTarget {
    fn from(employee: &Employee) -> Self {
        Self {
            key: RecordKey::Persisted(employee.id.clone()),
            fields: employee.fields.clone(),
        }
    }
}
