//! Data bridge — connects the store and view-state subscriptions to TUI
//! actions.
//!
//! Runs as a background task forwarding every published snapshot and every
//! view transition as an [`Action`] through the TUI's action channel.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use roster_core::{CollectionStore, ViewState};

use crate::action::Action;

/// Forward store snapshots and view transitions until cancelled.
///
/// The current view state is pushed first. The current snapshot is pushed
/// only once the store has refreshed, so an empty placeholder is never
/// mistaken for an empty collection.
pub async fn spawn_data_bridge(
    store: Arc<CollectionStore>,
    mut view_state: watch::Receiver<ViewState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut snapshots = store.subscribe();

    if store.last_refreshed().is_some() {
        let _ = action_tx.send(Action::SnapshotUpdated(snapshots.current().clone()));
    }
    let initial = view_state.borrow_and_update().clone();
    let _ = action_tx.send(Action::ViewChanged(initial));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = snapshots.changed() => {
                debug!(count = snapshot.len(), "dispatching SnapshotUpdated");
                let _ = action_tx.send(Action::SnapshotUpdated(snapshot));
            }
            Ok(()) = view_state.changed() => {
                let state = view_state.borrow_and_update().clone();
                debug!(state = state.name(), "dispatching ViewChanged");
                let _ = action_tx.send(Action::ViewChanged(state));
            }
            else => break,
        }
    }

    debug!("data bridge shut down");
}
