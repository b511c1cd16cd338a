//! Application facade
//!
//! Wires the gateway into the controllers and owns their shared
//! plumbing. The gateway is an explicit constructor dependency so
//! tests (and alternative transports) can substitute a double.

use std::sync::Arc;

use stockroom_client::ProductGateway;

use crate::delete::DeleteFlow;
use crate::inventory::InventoryState;
use crate::mutation::MutationWorkflow;
use crate::notice::NoticeBus;
use crate::search::SearchController;

/// The assembled interaction-state layer
pub struct ProductManager {
    pub notices: NoticeBus,
    pub inventory: Arc<InventoryState>,
    pub search: Arc<SearchController>,
    pub mutations: MutationWorkflow,
    pub deletes: DeleteFlow,
}

impl ProductManager {
    pub fn new(gateway: Arc<dyn ProductGateway>) -> Self {
        let notices = NoticeBus::new();
        let inventory = Arc::new(InventoryState::new());
        let search = SearchController::new(
            Arc::clone(&gateway),
            Arc::clone(&inventory),
            notices.clone(),
        );
        let mutations = MutationWorkflow::new(
            Arc::clone(&gateway),
            Arc::clone(&search),
            notices.clone(),
        );
        let deletes = DeleteFlow::new(gateway, Arc::clone(&search), notices.clone());

        Self {
            notices,
            inventory,
            search,
            mutations,
            deletes,
        }
    }

    /// Perform the initial fetch with the empty query
    pub async fn start(&self) {
        self.search.start().await;
    }

    /// Tear down timers and discard in-flight fetch results
    pub fn shutdown(&self) {
        self.search.shutdown();
    }
}
