//! Search controller
//!
//! Owns the query string and the fetch cycle: a trailing-edge 350 ms
//! debounce on keystrokes, one immediate fetch on startup, and
//! explicit refreshes after successful mutations. Each fetch carries
//! an issue-time sequence number; a response that is no longer the
//! latest issued fetch is discarded wholesale so the view never
//! regresses to a stale result.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use stockroom_client::ProductGateway;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::inventory::InventoryState;
use crate::notice::NoticeBus;

/// Quiet period before a keystroke-driven fetch fires
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

/// Search controller state
pub struct SearchController {
    /// Shared with debounced fetch tasks
    inner: Arc<SearchInner>,
    debounce: Debouncer,
}

struct SearchInner {
    gateway: Arc<dyn ProductGateway>,
    inventory: Arc<InventoryState>,
    notices: NoticeBus,
    query: Mutex<String>,
    loading: AtomicBool,
    /// Sequence number of the most recently issued fetch
    fetch_seq: AtomicU64,
    /// Set on shutdown; in-flight results are discarded afterwards
    teardown: CancellationToken,
}

impl SearchController {
    pub fn new(
        gateway: Arc<dyn ProductGateway>,
        inventory: Arc<InventoryState>,
        notices: NoticeBus,
    ) -> Arc<Self> {
        Arc::new(Self {
            inner: Arc::new(SearchInner {
                gateway,
                inventory,
                notices,
                query: Mutex::new(String::new()),
                loading: AtomicBool::new(false),
                fetch_seq: AtomicU64::new(0),
                teardown: CancellationToken::new(),
            }),
            debounce: Debouncer::new(SEARCH_DEBOUNCE),
        })
    }

    /// One immediate fetch with the empty query
    pub async fn start(&self) {
        self.inner.fetch_current().await;
    }

    /// Current query string
    pub fn query(&self) -> String {
        self.inner.query.lock().clone()
    }

    /// Whether the latest issued fetch is still in flight
    pub fn loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// Record a keystroke-driven query change and schedule a fetch
    /// after the quiet period. A newer change inside the window
    /// discards the pending fetch.
    pub fn set_query(&self, query: impl Into<String>) {
        *self.inner.query.lock() = query.into();

        let inner = Arc::clone(&self.inner);
        self.debounce.schedule(async move {
            inner.fetch_current().await;
        });
    }

    /// Clear the query and fetch immediately
    pub async fn reset(&self) {
        self.debounce.cancel_pending();
        self.inner.query.lock().clear();
        self.inner.fetch_current().await;
    }

    /// Immediate fetch with the current query; invoked after a
    /// successful create, update, or delete
    pub async fn refresh(&self) {
        self.inner.fetch_current().await;
    }

    /// Cancel the pending debounce timer and discard any in-flight
    /// fetch result. Call on view teardown.
    pub fn shutdown(&self) {
        self.debounce.cancel_pending();
        self.inner.teardown.cancel();
    }
}

impl SearchInner {
    async fn fetch_current(&self) {
        let query = self.query.lock().clone();
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);

        let filter = (!query.is_empty()).then_some(query.as_str());
        let result = self.gateway.list(filter).await;

        if self.teardown.is_cancelled() {
            return;
        }
        if seq != self.fetch_seq.load(Ordering::SeqCst) {
            // A newer fetch was issued while this one was in flight;
            // its settlement owns the snapshot and the loading flag.
            debug!("discarding stale product list response (seq {seq})");
            return;
        }

        match result {
            Ok(products) => self.inventory.replace(products),
            Err(err) => {
                warn!("product list fetch failed: {err}");
                self.notices.error("Failed to load products");
            }
        }
        self.loading.store(false, Ordering::SeqCst);
    }
}
