// Employee collection endpoints
//
// CRUD against `{base}` and `{base}/{id}`. The server owns the data;
// these calls never cache or reconcile anything locally.

use tracing::debug;

use crate::client::{EmployeeClient, decode};
use crate::error::Error;
use crate::models::{EmployeePayload, EmployeeRecord, RecordId};

impl EmployeeClient {
    /// List every record in the collection.
    ///
    /// `GET {base}`
    pub async fn list(&self) -> Result<Vec<EmployeeRecord>, Error> {
        let records: Vec<EmployeeRecord> = self.get(self.base_url().clone()).await?;
        debug!(count = records.len(), "listed employees");
        Ok(records)
    }

    /// Create a record. The server assigns the id.
    ///
    /// `POST {base}`
    ///
    /// Returns the created record when the server echoes one back. An empty
    /// or non-record response body still counts as success.
    pub async fn create(
        &self,
        payload: &EmployeePayload<'_>,
    ) -> Result<Option<EmployeeRecord>, Error> {
        let body = self.post(self.base_url().clone(), payload).await?;
        let created = decode::<EmployeeRecord>(&body).ok();
        if created.is_none() {
            debug!("create response carried no record");
        }
        Ok(created)
    }

    /// Replace a record's fields.
    ///
    /// `PUT {base}/{id}`
    pub async fn update(&self, id: &RecordId, payload: &EmployeePayload<'_>) -> Result<(), Error> {
        self.put(self.record_url(id), payload).await?;
        Ok(())
    }

    /// Delete a record.
    ///
    /// `DELETE {base}/{id}`
    pub async fn delete(&self, id: &RecordId) -> Result<(), Error> {
        self.send_delete(self.record_url(id)).await?;
        Ok(())
    }
}
