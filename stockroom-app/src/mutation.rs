//! Create/update mutation workflow
//!
//! A draft form is validated locally, coerced, and submitted through
//! the gateway. Outcomes surface as notices; the product list is
//! re-fetched after a successful save so the snapshot reflects the
//! change.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;
use shared::{Product, ProductPayload};
use stockroom_client::ProductGateway;
use thiserror::Error;
use tracing::warn;

use crate::notice::NoticeBus;
use crate::search::SearchController;

/// Pre-flight validation failure
///
/// Handled entirely locally: blocks submission and never reaches the
/// network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Valid price is required")]
    InvalidPrice,

    #[error("Valid quantity is required")]
    InvalidQuantity,
}

/// In-progress, unsaved product form
///
/// All inputs stay raw text exactly as typed until validation coerces
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Target id for updates; a `None` draft creates a new product
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

impl ProductDraft {
    /// Draft pre-filled from an existing record, for editing
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }

    /// Validate and coerce into a request payload
    ///
    /// Checks run in order; the first failure wins.
    pub fn validate(&self) -> Result<ProductPayload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        let price = self
            .price
            .trim()
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidPrice)?;
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidQuantity)?;

        Ok(ProductPayload {
            name: self.name.clone(),
            description: non_empty(&self.description),
            category: non_empty(&self.category),
            price,
            quantity,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Outcome of a submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Saved; the caller clears or navigates away from the draft
    Saved(Product),
    /// Validation rejected the draft; no network call was made
    Rejected(ValidationError),
    /// The gateway call failed; the caller keeps the draft for retry
    Failed,
}

/// Create/update workflow over the gateway
pub struct MutationWorkflow {
    gateway: Arc<dyn ProductGateway>,
    search: Arc<SearchController>,
    notices: NoticeBus,
    saving: AtomicBool,
}

impl MutationWorkflow {
    pub fn new(
        gateway: Arc<dyn ProductGateway>,
        search: Arc<SearchController>,
        notices: NoticeBus,
    ) -> Self {
        Self {
            gateway,
            search,
            notices,
            saving: AtomicBool::new(false),
        }
    }

    /// Whether a submit is in flight (disables the submit affordance)
    pub fn saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Fetch a product into a draft for editing
    pub async fn load_draft(&self, id: &str) -> Option<ProductDraft> {
        match self.gateway.get(id).await {
            Ok(product) => Some(ProductDraft::from_product(&product)),
            Err(err) => {
                warn!("product load failed for {id}: {err}");
                self.notices.error("Failed to load product");
                None
            }
        }
    }

    /// Validate and submit the draft: create when it has no id,
    /// update otherwise. `saving` clears unconditionally when the
    /// call settles.
    pub async fn submit(&self, draft: &ProductDraft) -> SubmitOutcome {
        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.notices.warning(err.to_string());
                return SubmitOutcome::Rejected(err);
            }
        };

        self.saving.store(true, Ordering::SeqCst);
        let result = match &draft.id {
            Some(id) => self.gateway.update(id, &payload).await,
            None => self.gateway.create(&payload).await,
        };
        self.saving.store(false, Ordering::SeqCst);

        match result {
            Ok(product) => {
                self.notices.success(if draft.id.is_some() {
                    "Product updated"
                } else {
                    "Product added"
                });
                self.search.refresh().await;
                SubmitOutcome::Saved(product)
            }
            Err(err) => {
                warn!("product save failed: {err}");
                self.notices.error("Save failed");
                SubmitOutcome::Failed
            }
        }
    }
}
