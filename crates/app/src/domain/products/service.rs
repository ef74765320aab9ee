//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::products::{
    catalog::Catalog, errors::ProductsServiceError, models::Product, recommendations::Budget,
};

/// [`ProductsService`] backed by an immutable in-memory [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogProductsService {
    catalog: Arc<Catalog>,
}

impl CatalogProductsService {
    /// Serve lookups from `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[async_trait]
impl ProductsService for CatalogProductsService {
    async fn list_products(&self) -> Vec<Product> {
        self.catalog.products().to_vec()
    }

    async fn find_by_barcode(&self, barcode: &str) -> Result<Product, ProductsServiceError> {
        self.catalog
            .find_by_barcode(barcode)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn recommend(&self, barcode: &str, budget: Budget) -> Vec<Product> {
        self.catalog.recommend(barcode, budget)
    }
}

/// Catalog lookups.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products in catalog order.
    async fn list_products(&self) -> Vec<Product>;

    /// Retrieve the product carrying `barcode`.
    async fn find_by_barcode(&self, barcode: &str) -> Result<Product, ProductsServiceError>;

    /// Products to suggest alongside `barcode`, best first.
    async fn recommend(&self, barcode: &str, budget: Budget) -> Vec<Product>;
}
