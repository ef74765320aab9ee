//! Product Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;

/// Product category, e.g. `Fruits` or `Bakery`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// Create a category from its display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Category name as stored in the catalog.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Catalog-unique numeric identifier
    pub id: u64,

    /// Catalog-unique barcode used for scan lookups
    pub barcode: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Category used for recommendations
    pub category: Category,

    /// Non-negative unit price
    pub price: Decimal,

    /// Path of the product image served by the frontend
    pub image_path: String,

    /// Whether the product is marked eco-friendly
    pub eco_friendly: bool,
}
