//! In-memory product catalog.

use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::info;

use crate::domain::products::{
    data::{DEFAULT_CATALOG_YAML, parse_products},
    errors::CatalogError,
    models::Product,
};

/// Immutable list of products, kept in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, checking that ids and barcodes are unique.
    ///
    /// # Errors
    ///
    /// Returns an error if a barcode is blank or an id/barcode is repeated.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ids = FxHashSet::default();
        let mut barcodes = FxHashSet::default();

        for product in &products {
            if product.barcode.trim().is_empty() {
                return Err(CatalogError::EmptyBarcode(product.id));
            }

            if !ids.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }

            if !barcodes.insert(product.barcode.as_str()) {
                return Err(CatalogError::DuplicateBarcode(product.barcode.clone()));
            }
        }

        Ok(Self { products })
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid or fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Self::new(parse_products(yaml)?)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub async fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_yaml(&yaml)?;

        info!(
            path = %path.display(),
            products = catalog.len(),
            "loaded catalog from file"
        );

        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(DEFAULT_CATALOG_YAML)
    }

    /// All products in load order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First product carrying `barcode`.
    #[must_use]
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.barcode == barcode)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::domain::products::models::Category;

    use super::*;

    fn product(id: u64, barcode: &str) -> Product {
        Product {
            id,
            barcode: barcode.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            category: Category::from("Pantry"),
            price: Decimal::ONE,
            image_path: String::new(),
            eco_friendly: false,
        }
    }

    #[test]
    fn find_by_barcode_returns_exact_match_for_every_product() -> TestResult {
        let catalog = Catalog::builtin()?;

        for product in catalog.products() {
            let found = catalog.find_by_barcode(&product.barcode);

            assert_eq!(found, Some(product), "lookup of {}", product.barcode);
        }

        Ok(())
    }

    #[test]
    fn find_by_barcode_unknown_returns_none() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert!(catalog.find_by_barcode("0000000000000").is_none());
        assert!(catalog.find_by_barcode("").is_none());

        Ok(())
    }

    #[test]
    fn duplicate_barcode_is_rejected() {
        let result = Catalog::new(vec![product(1, "111"), product(2, "111")]);

        assert!(matches!(result, Err(CatalogError::DuplicateBarcode(code)) if code == "111"));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let result = Catalog::new(vec![product(1, "111"), product(1, "222")]);

        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn blank_barcode_is_rejected() {
        let result = Catalog::new(vec![product(9, "  ")]);

        assert!(matches!(result, Err(CatalogError::EmptyBarcode(9))));
    }

    #[tokio::test]
    async fn from_path_reports_missing_file() {
        let result = Catalog::from_path(Path::new("/nonexistent/catalog.yaml")).await;

        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }
}
