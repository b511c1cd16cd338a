//! Inventory view state
//!
//! Holds the most recently fetched snapshot and derives summary
//! statistics from it. The snapshot is replaced wholesale on every
//! successful fetch; nothing mutates it in place.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use shared::Product;
use tokio::sync::watch;

/// Quantity below which a product counts as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Monetary display precision (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Snapshot holder
///
/// Consumers that re-render on change subscribe to the watch channel;
/// `snapshot` hands out the current collection without copying it.
#[derive(Debug)]
pub struct InventoryState {
    snapshot: watch::Sender<Arc<Vec<Product>>>,
}

impl InventoryState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot: tx }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        self.snapshot.borrow().clone()
    }

    /// Replace the snapshot wholesale
    pub(crate) fn replace(&self, products: Vec<Product>) {
        self.snapshot.send_replace(Arc::new(products));
    }

    /// Watch for snapshot replacements
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Product>>> {
        self.snapshot.subscribe()
    }

    /// Statistics over the current snapshot
    pub fn stats(&self) -> InventoryStats {
        InventoryStats::compute(&self.snapshot())
    }
}

impl Default for InventoryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics derived from one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStats {
    pub total_products: usize,
    /// Σ price × quantity, accumulated exactly; round only for display
    pub total_value: Decimal,
    /// Products with quantity below [`LOW_STOCK_THRESHOLD`]
    pub low_stock: usize,
    /// Distinct non-empty category labels, case-insensitive
    pub categories: usize,
}

impl InventoryStats {
    /// Single pass over the snapshot; all four figures come from the
    /// same collection instant.
    pub fn compute(products: &[Product]) -> Self {
        let mut total_value = Decimal::ZERO;
        let mut low_stock = 0;
        let mut labels: HashSet<String> = HashSet::new();

        for product in products {
            total_value += product.price * Decimal::from(product.quantity);
            if product.quantity < LOW_STOCK_THRESHOLD {
                low_stock += 1;
            }
            if let Some(category) = &product.category {
                let label = category.to_lowercase();
                if !label.is_empty() {
                    labels.insert(label);
                }
            }
        }

        Self {
            total_products: products.len(),
            total_value,
            low_stock,
            categories: labels.len(),
        }
    }

    /// Total value rounded for display
    pub fn total_value_display(&self) -> Decimal {
        self.total_value
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: Option<&str>, price: &str, quantity: i64) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            description: None,
            category: category.map(str::to_string),
            price: price.parse().unwrap(),
            quantity,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn empty_snapshot() {
        let stats = InventoryStats::compute(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_value, Decimal::ZERO);
        assert_eq!(stats.low_stock, 0);
        assert_eq!(stats.categories, 0);
    }

    #[test]
    fn value_accumulates_exactly() {
        // 10.99 * 3 + 0.10 * 7 = 33.67, exact in Decimal
        let products = vec![
            product("a", None, "10.99", 3),
            product("b", None, "0.10", 7),
        ];
        let stats = InventoryStats::compute(&products);
        assert_eq!(stats.total_value, "33.67".parse::<Decimal>().unwrap());
    }

    #[test]
    fn display_rounds_half_up() {
        // 0.333 * 5 = 1.665 -> 1.67 at display, unrounded internally
        let products = vec![product("a", None, "0.333", 5)];
        let stats = InventoryStats::compute(&products);
        assert_eq!(stats.total_value, "1.665".parse::<Decimal>().unwrap());
        assert_eq!(
            stats.total_value_display(),
            "1.67".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn low_stock_boundary() {
        let products = vec![
            product("none", None, "1.00", 0),
            product("four", None, "1.00", 4),
            product("five", None, "1.00", 5),
            product("many", None, "1.00", 50),
        ];
        let stats = InventoryStats::compute(&products);
        assert_eq!(stats.low_stock, 2);
    }

    #[test]
    fn categories_distinct_case_insensitive() {
        let products = vec![
            product("a", Some("Tools"), "1.00", 1),
            product("b", Some("tools"), "1.00", 1),
            product("c", Some("TOOLS"), "1.00", 1),
            product("d", Some("Garden"), "1.00", 1),
            product("e", Some(""), "1.00", 1),
            product("f", None, "1.00", 1),
        ];
        let stats = InventoryStats::compute(&products);
        assert_eq!(stats.categories, 2);
    }

    #[test]
    fn replace_notifies_watchers() {
        let state = InventoryState::new();
        let mut rx = state.subscribe();

        state.replace(vec![product("a", None, "1.00", 1)]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(state.snapshot().len(), 1);
        assert_eq!(state.stats().total_products, 1);
    }
}
