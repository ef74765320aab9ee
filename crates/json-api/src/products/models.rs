//! Product Models

use rust_decimal::prelude::ToPrimitive;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use scancart_app::domain::products::models::Product;

/// Product as the frontend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// Catalog identifier
    pub id: u64,

    /// Product barcode
    pub barcode: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Product category
    pub category: String,

    /// Unit price
    pub price: f64,

    /// Image path relative to the frontend
    pub image: String,

    /// Whether the product is eco-friendly
    pub eco_friendly: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            price: product.price.to_f64().unwrap_or_default(),
            category: product.category.to_string(),
            barcode: product.barcode,
            name: product.name,
            description: product.description,
            image: product.image_path,
            eco_friendly: product.eco_friendly,
        }
    }
}
