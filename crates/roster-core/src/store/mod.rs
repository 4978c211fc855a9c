// ── Collection store ──
//
// Single source of truth for the remote collection's contents. The snapshot
// is only ever replaced wholesale by a successful refresh; mutations go to
// the server and are picked up by the next refresh.

mod stream;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use roster_api::{EmployeeClient, RecordId};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::convert::payload;
use crate::error::CoreError;
use crate::model::{Employee, EmployeeFields, EmployeeId};

pub use stream::{SnapshotStream, SnapshotWatchStream};

/// Full copy of the remote collection, in server order.
pub type Snapshot = Arc<Vec<Arc<Employee>>>;

/// Owns the HTTP client and the current snapshot.
///
/// All methods take `&self`, so the store can be shared behind an `Arc`
/// between the view controller and snapshot readers.
pub struct CollectionStore {
    client: EmployeeClient,
    timeout: Option<Duration>,
    snapshot: watch::Sender<Snapshot>,
    last_refreshed: watch::Sender<Option<DateTime<Utc>>>,
}

impl CollectionStore {
    /// Build a store whose HTTP client follows `config`.
    pub fn new(config: &StoreConfig) -> Result<Self, CoreError> {
        let client = EmployeeClient::new(config.api_url.clone(), &config.transport())?;
        let mut store = Self::with_client(client);
        store.timeout = Some(config.timeout);
        Ok(store)
    }

    /// Build a store around a prebuilt client.
    pub fn with_client(client: EmployeeClient) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (last_refreshed, _) = watch::channel(None);
        Self {
            client,
            timeout: None,
            snapshot,
            last_refreshed,
        }
    }

    /// The collection URL this store talks to.
    pub fn api_url(&self) -> &url::Url {
        self.client.base_url()
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Fetch the full collection and replace the snapshot.
    ///
    /// On failure the previous snapshot stays in place and subscribers are
    /// not notified.
    pub async fn refresh(&self) -> Result<Snapshot, CoreError> {
        let records = self.client.list().await.map_err(|e| {
            warn!(error = %e, "refresh failed");
            self.translate(e)
        })?;

        let values: Vec<Arc<Employee>> = records
            .into_iter()
            .map(|r| Arc::new(Employee::from(r)))
            .collect();
        let snap: Snapshot = Arc::new(values);

        info!(count = snap.len(), "snapshot refreshed");
        // `send_replace` updates unconditionally, even with zero receivers.
        self.snapshot.send_replace(Arc::clone(&snap));
        self.last_refreshed.send_replace(Some(Utc::now()));
        Ok(snap)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Ask the server to create a record. The snapshot is not touched.
    ///
    /// Returns the created record if the server echoed one back.
    pub async fn create(&self, fields: &EmployeeFields) -> Result<Option<Employee>, CoreError> {
        let created = self
            .client
            .create(&payload(None, fields))
            .await
            .map_err(|e| self.translate(e))?
            .map(Employee::from);

        match &created {
            Some(emp) => debug!(id = %emp.id, "employee created"),
            None => debug!("employee created"),
        }
        Ok(created)
    }

    /// Ask the server to replace a record's fields. The snapshot is not touched.
    pub async fn update(&self, employee: &Employee) -> Result<(), CoreError> {
        let id = RecordId::from(&employee.id);
        self.client
            .update(&id, &payload(Some(&id), &employee.fields))
            .await
            .map_err(|e| self.translate_for(e, &employee.id))?;

        debug!(id = %employee.id, "employee updated");
        Ok(())
    }

    /// Ask the server to delete a record. The snapshot is not touched.
    pub async fn delete(&self, id: &EmployeeId) -> Result<(), CoreError> {
        self.client
            .delete(&RecordId::from(id))
            .await
            .map_err(|e| self.translate_for(e, id))?;

        debug!(%id, "employee deleted");
        Ok(())
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Look up a record in the current snapshot.
    ///
    /// Ids compare by their textual form, so `"7"` finds a record whose id
    /// the server sent as the number `7`.
    pub fn get(&self, id: &EmployeeId) -> Option<Arc<Employee>> {
        let wanted = id.to_string();
        self.snapshot
            .borrow()
            .iter()
            .find(|e| e.id == *id || e.id.to_string() == wanted)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// When the snapshot was last replaced, if ever.
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        *self.last_refreshed.borrow()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.snapshot.subscribe())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn translate(&self, err: roster_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.timeout.map_or(0, |t| t.as_secs()),
            },
            other => other,
        }
    }

    /// Like `translate`, but a 404 on a record URL names the missing record.
    fn translate_for(&self, err: roster_api::Error, id: &EmployeeId) -> CoreError {
        if err.is_not_found() {
            CoreError::NotFound {
                identifier: id.to_string(),
            }
        } else {
            self.translate(err)
        }
    }
}
