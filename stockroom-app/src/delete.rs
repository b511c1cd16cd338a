//! Delete confirmation flow
//!
//! Destructive deletes sit behind an explicit confirmation step. At
//! most one delete is in flight at a time; a request made while one
//! is running is rejected. There is no optimistic removal: a row only
//! disappears when the re-fetched snapshot no longer carries it.

use std::sync::Arc;

use parking_lot::Mutex;
use stockroom_client::ProductGateway;
use tracing::warn;

use crate::notice::NoticeBus;
use crate::search::SearchController;

/// Confirmation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    /// Awaiting explicit confirmation for this target
    Confirming { id: String },
    /// Delete call in flight
    Deleting { id: String },
}

/// Confirmation-gated delete workflow
pub struct DeleteFlow {
    gateway: Arc<dyn ProductGateway>,
    search: Arc<SearchController>,
    notices: NoticeBus,
    state: Mutex<DeleteState>,
}

impl DeleteFlow {
    pub fn new(
        gateway: Arc<dyn ProductGateway>,
        search: Arc<SearchController>,
        notices: NoticeBus,
    ) -> Self {
        Self {
            gateway,
            search,
            notices,
            state: Mutex::new(DeleteState::Idle),
        }
    }

    /// Current flow state
    pub fn state(&self) -> DeleteState {
        self.state.lock().clone()
    }

    /// Ask for confirmation to delete `id`. Re-requesting while
    /// already confirming retargets the confirmation; a request while
    /// a delete is in flight is rejected.
    pub fn request(&self, id: impl Into<String>) -> bool {
        let mut state = self.state.lock();
        match *state {
            DeleteState::Deleting { .. } => false,
            _ => {
                *state = DeleteState::Confirming { id: id.into() };
                true
            }
        }
    }

    /// Back out of the confirmation; no network effect
    pub fn cancel(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            DeleteState::Confirming { .. } => {
                *state = DeleteState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Confirm the pending delete and issue it. The flow returns to
    /// `Idle` when the call settles, success or failure; returns
    /// whether the delete succeeded.
    pub async fn confirm(&self) -> bool {
        let id = {
            let mut state = self.state.lock();
            match state.clone() {
                DeleteState::Confirming { id } => {
                    *state = DeleteState::Deleting { id: id.clone() };
                    id
                }
                _ => return false,
            }
        };

        let result = self.gateway.delete(&id).await;
        *self.state.lock() = DeleteState::Idle;

        match result {
            Ok(()) => {
                self.notices.success("Product deleted");
                self.search.refresh().await;
                true
            }
            Err(err) => {
                warn!("product delete failed for {id}: {err}");
                self.notices.error("Delete failed");
                false
            }
        }
    }
}
