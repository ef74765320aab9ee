//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    carts::models::{Cart, CartEntry},
    products::models::Product,
};

/// [`CartsService`] holding the single process-lifetime cart in memory.
#[derive(Debug, Default)]
pub struct InMemoryCartsService {
    entries: RwLock<FxHashMap<String, CartEntry>>,
}

impl InMemoryCartsService {
    /// Empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartsService for InMemoryCartsService {
    async fn add_product(&self, product: Product) -> CartEntry {
        let mut entries = self.entries.write().await;

        let entry = entries
            .entry(product.barcode.clone())
            .and_modify(|entry| entry.quantity = entry.quantity.saturating_add(1))
            .or_insert_with(|| CartEntry {
                product,
                quantity: 1,
            });

        debug!(
            barcode = %entry.product.barcode,
            quantity = entry.quantity,
            "cart entry updated"
        );

        entry.clone()
    }

    async fn get_cart(&self) -> Cart {
        let entries = self.entries.read().await;

        Cart {
            entries: entries
                .iter()
                .map(|(barcode, entry)| (barcode.clone(), entry.clone()))
                .collect(),
        }
    }
}

/// The shopping cart filled by the scanner.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add one unit of `product`, keyed by its barcode. Returns the updated entry.
    async fn add_product(&self, product: Product) -> CartEntry;

    /// Snapshot of the whole cart.
    async fn get_cart(&self) -> Cart;
}
