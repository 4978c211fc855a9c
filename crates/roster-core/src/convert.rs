// ── API-to-domain type conversions ──
//
// Bridges raw `roster_api` wire types into canonical `roster_core::model`
// types and back into request payloads.

use roster_api::{EmployeePayload, EmployeeRecord, RecordId};

use crate::model::{Employee, EmployeeFields, EmployeeId};

impl From<RecordId> for EmployeeId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Number(n) => Self::Number(n),
            RecordId::Text(s) => Self::Text(s),
        }
    }
}

impl From<&EmployeeId> for RecordId {
    fn from(id: &EmployeeId) -> Self {
        match id {
            EmployeeId::Number(n) => Self::Number(n.clone()),
            EmployeeId::Text(s) => Self::Text(s.clone()),
        }
    }
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: record.id.into(),
            fields: EmployeeFields {
                first_name: record.first_name,
                last_name: record.last_name,
                email: record.email,
            },
        }
    }
}

/// Build a request body. `id` is `None` for creates.
pub(crate) fn payload<'a>(
    id: Option<&'a RecordId>,
    fields: &'a EmployeeFields,
) -> EmployeePayload<'a> {
    EmployeePayload {
        id,
        first_name: &fields.first_name,
        last_name: &fields.last_name,
        email: &fields.email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_converts_to_employee() {
        let emp = Employee::from(EmployeeRecord {
            id: RecordId::Text("b3".into()),
            first_name: "Bo".into(),
            last_name: "Kim".into(),
            email: "b@x.com".into(),
        });
        assert_eq!(emp.id, EmployeeId::Text("b3".into()));
        assert_eq!(emp.fields, EmployeeFields::new("Bo", "Kim", "b@x.com"));
    }

    #[test]
    fn id_form_survives_round_trip() {
        let id = EmployeeId::from(12_u64);
        assert_eq!(EmployeeId::from(RecordId::from(&id)), id);
    }
}
