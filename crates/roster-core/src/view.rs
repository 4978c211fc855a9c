// ── View controller ──
//
// Two-state machine between user intents and the collection store. The
// single edit target doubles as the mutation gate: no intent that reaches the
// network can start while another is open or in flight.

use std::sync::Arc;

use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{EditTarget, Employee, EmployeeFields, EmployeeId, RecordKey};
use crate::store::CollectionStore;

/// What the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// The employee table.
    ListView,
    /// The shared add/edit form, open on one record.
    EditView(EditTarget),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListView => "list view",
            Self::EditView(_) => "edit view",
        }
    }
}

/// A user request dispatched to the view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Intent {
    Add,
    Edit,
    Cancel,
    Save,
    Delete,
}

/// Mediates between user intents and the collection store.
///
/// Mutating intents take `&mut self`, so at most one is ever in flight. The
/// current state is published on a `watch` channel for front ends that
/// render it.
pub struct ViewController {
    store: Arc<CollectionStore>,
    state: watch::Sender<ViewState>,
}

impl ViewController {
    /// Start in `ListView` with whatever snapshot the store holds.
    pub fn new(store: Arc<CollectionStore>) -> Self {
        let (state, _) = watch::channel(ViewState::ListView);
        Self { store, state }
    }

    /// Initial load. On failure the view stays in `ListView` and the error
    /// is returned.
    pub async fn start(&self) -> Result<(), CoreError> {
        self.store.refresh().await?;
        Ok(())
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Open the form on a blank draft.
    pub fn add(&mut self) -> Result<(), CoreError> {
        self.require_list(Intent::Add)?;
        self.transition(ViewState::EditView(EditTarget::draft()));
        Ok(())
    }

    /// Open the form on an existing record.
    pub fn edit(&mut self, employee: &Employee) -> Result<(), CoreError> {
        self.require_list(Intent::Edit)?;
        self.transition(ViewState::EditView(EditTarget::from(employee)));
        Ok(())
    }

    /// Close the form and discard the target. Never touches the network.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        if !self.is_editing() {
            return Err(self.rejected(Intent::Cancel));
        }
        self.transition(ViewState::ListView);
        Ok(())
    }

    /// Validate and submit the form, then refresh.
    ///
    /// Drafts are created, persisted targets are updated. Blank fields or a
    /// failed mutation leave the form open on the unchanged target. Once the
    /// mutation succeeds the form closes even if the refresh fails; that case
    /// is reported as `CoreError::RefreshAfterMutation`.
    pub async fn save(&mut self, fields: EmployeeFields) -> Result<(), CoreError> {
        let Some(target) = self.edit_target() else {
            return Err(self.rejected(Intent::Save));
        };

        let missing = fields.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "save rejected by validation");
            return Err(CoreError::ValidationFailed {
                fields: missing.into_iter().map(String::from).collect(),
            });
        }

        match target.key {
            RecordKey::Draft => {
                self.store.create(&fields).await?;
            }
            RecordKey::Persisted(id) => {
                self.store.update(&Employee { id, fields }).await?;
            }
        }

        let refreshed = self.refresh_after(Intent::Save).await;
        self.transition(ViewState::ListView);
        refreshed
    }

    /// Delete a record from the list, then refresh.
    pub async fn delete(&mut self, id: &EmployeeId) -> Result<(), CoreError> {
        self.require_list(Intent::Delete)?;
        self.store.delete(id).await?;
        self.refresh_after(Intent::Delete).await
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn is_editing(&self) -> bool {
        matches!(*self.state.borrow(), ViewState::EditView(_))
    }

    /// The record open in the form, if any.
    pub fn edit_target(&self) -> Option<EditTarget> {
        match &*self.state.borrow() {
            ViewState::EditView(target) => Some(target.clone()),
            ViewState::ListView => None,
        }
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn transition(&self, next: ViewState) {
        info!(from = self.state.borrow().name(), to = next.name(), "view transition");
        self.state.send_replace(next);
    }

    fn require_list(&self, intent: Intent) -> Result<(), CoreError> {
        if self.is_editing() {
            Err(self.rejected(intent))
        } else {
            Ok(())
        }
    }

    fn rejected(&self, intent: Intent) -> CoreError {
        let state = self.state.borrow().name();
        debug!(%intent, state, "intent rejected");
        CoreError::IntentRejected { intent, state }
    }

    async fn refresh_after(&self, mutation: Intent) -> Result<(), CoreError> {
        match self.store.refresh().await {
            Ok(_) => Ok(()),
            Err(source) => {
                warn!(%mutation, error = %source, "refresh after mutation failed");
                Err(CoreError::RefreshAfterMutation {
                    mutation,
                    source: Box::new(source),
                })
            }
        }
    }
}
