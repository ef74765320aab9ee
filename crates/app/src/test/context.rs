//! Test context wiring in-memory services over the bundled catalog.

use std::sync::Arc;

use crate::domain::{
    carts::{CartsService, InMemoryCartsService},
    products::{Catalog, CatalogError, CatalogProductsService, ProductsService},
};

pub(crate) struct TestContext {
    pub(crate) products: Arc<dyn ProductsService>,
    pub(crate) carts: Arc<dyn CartsService>,
}

impl TestContext {
    pub(crate) fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            products: Arc::new(CatalogProductsService::new(Catalog::builtin()?)),
            carts: Arc::new(InMemoryCartsService::new()),
        })
    }
}
