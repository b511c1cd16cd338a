//! In-memory gateway double
//!
//! Exercises the controllers without a network. Supports scripted
//! per-call list responses and delays (for the debounce and
//! stale-response properties) plus blanket failure injection.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{Product, ProductPayload};
use stockroom_client::{GatewayError, GatewayResult, ProductGateway};

/// A scripted response for one `list` call
pub struct ListScript {
    pub delay: Duration,
    pub products: Vec<Product>,
}

#[derive(Default)]
pub struct InMemoryGateway {
    records: Mutex<Vec<Product>>,
    next_id: AtomicU64,
    fail: AtomicBool,
    /// Per-call scripts consumed front-first; empty means "serve the
    /// records with the usual filter"
    list_scripts: Mutex<VecDeque<ListScript>>,
    delete_delay: Mutex<Option<Duration>>,

    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub last_query: Mutex<Option<String>>,
}

impl InMemoryGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_products(products: Vec<Product>) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.records.lock() = products;
        Arc::new(gateway)
    }

    /// Make every subsequent call fail
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn push_list_script(&self, delay: Duration, products: Vec<Product>) {
        self.list_scripts
            .lock()
            .push_back(ListScript { delay, products });
    }

    pub fn set_delete_delay(&self, delay: Duration) {
        *self.delete_delay.lock() = Some(delay);
    }

    pub fn records(&self) -> Vec<Product> {
        self.records.lock().clone()
    }

    fn check_fail(&self) -> GatewayResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::Internal("simulated failure".to_string()));
        }
        Ok(())
    }

    fn apply(payload: &ProductPayload, id: String, existing: Option<&Product>) -> Product {
        Product {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            category: payload.category.clone(),
            price: payload.price,
            quantity: payload.quantity,
            created_at: existing.and_then(|p| p.created_at.clone()),
            updated_at: None,
        }
    }
}

#[async_trait]
impl ProductGateway for InMemoryGateway {
    async fn list(&self, query: Option<&str>) -> GatewayResult<Vec<Product>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock() = query.map(str::to_string);

        let script = self.list_scripts.lock().pop_front();
        if let Some(script) = script {
            tokio::time::sleep(script.delay).await;
            self.check_fail()?;
            return Ok(script.products);
        }

        self.check_fail()?;
        let records = self.records.lock().clone();
        Ok(match query {
            Some(q) if !q.is_empty() => {
                let needle = q.to_lowercase();
                records
                    .into_iter()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .collect()
            }
            _ => records,
        })
    }

    async fn get(&self, id: &str) -> GatewayResult<Product> {
        self.check_fail()?;
        self.records
            .lock()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn create(&self, payload: &ProductPayload) -> GatewayResult<Product> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;

        let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        let product = Self::apply(payload, id, None);
        self.records.lock().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, payload: &ProductPayload) -> GatewayResult<Product> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;

        let mut records = self.records.lock();
        let slot = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        *slot = Self::apply(payload, id.to_string(), Some(&*slot));
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delete_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_fail()?;

        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|p| p.id != id);
        if records.len() == before {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Build a product record the way the store would hand it out
pub fn product(id: &str, name: &str, price: &str, quantity: i64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        category: None,
        price: price.parse().unwrap(),
        quantity,
        created_at: None,
        updated_at: None,
    }
}
