//! Catalog Fixtures

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::products::{
    errors::CatalogError,
    models::{Category, Product},
};

/// Catalog shipped with the binary.
pub const DEFAULT_CATALOG_YAML: &str = include_str!("catalog.yaml");

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFixture {
    /// Product id
    pub id: u64,

    /// Product barcode
    pub barcode: String,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product category
    pub category: String,

    /// Product price (e.g., "4.99")
    pub price: String,

    /// Product image path
    #[serde(default)]
    pub image: String,

    /// Eco-friendly flag
    #[serde(default)]
    pub eco_friendly: bool,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(Product {
            id: fixture.id,
            barcode: fixture.barcode,
            name: fixture.name,
            description: fixture.description,
            category: Category::new(fixture.category),
            price,
            image_path: fixture.image,
            eco_friendly: fixture.eco_friendly,
        })
    }
}

/// Parse a price string (e.g., "4.99") into a non-negative decimal.
///
/// # Errors
///
/// Returns an error if the string is not a decimal number or is negative.
pub fn parse_price(s: &str) -> Result<Decimal, CatalogError> {
    let price = Decimal::from_str(s.trim()).map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    Ok(price)
}

/// Parse a YAML catalog document into products, preserving document order.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed or a price is invalid.
pub fn parse_products(yaml: &str) -> Result<Vec<Product>, CatalogError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    fixture.products.into_iter().map(Product::try_from).collect()
}
