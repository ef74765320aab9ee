//! App Context

use std::sync::Arc;

use crate::{
    capture::{CaptureDevices, Decoder},
    domain::{
        carts::{CartsService, InMemoryCartsService},
        products::{Catalog, CatalogProductsService, ProductsService},
        scanning::{ScanController, ScannerService, ScannerSettings},
    },
};

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    /// Catalog lookups and recommendations
    pub products: Arc<dyn ProductsService>,

    /// The single shopping cart
    pub carts: Arc<dyn CartsService>,

    /// Capture session lifecycle
    pub scanner: Arc<dyn ScannerService>,
}

impl AppContext {
    /// Build application context around a loaded catalog and capture backend.
    ///
    /// The scanner writes into the same cart the handlers read.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        devices: Arc<dyn CaptureDevices>,
        decoder: Arc<dyn Decoder>,
        settings: ScannerSettings,
    ) -> Self {
        let products: Arc<dyn ProductsService> = Arc::new(CatalogProductsService::new(catalog));
        let carts: Arc<dyn CartsService> = Arc::new(InMemoryCartsService::new());

        let scanner = Arc::new(ScanController::new(
            Arc::clone(&products),
            Arc::clone(&carts),
            devices,
            decoder,
            settings,
        ));

        Self {
            products,
            carts,
            scanner,
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
