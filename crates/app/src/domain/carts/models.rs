//! Cart Models

use std::collections::BTreeMap;

use crate::domain::products::models::Product;

/// A product in the cart together with how many times it was scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    /// Product resolved from the scanned barcode
    pub product: Product,

    /// Number of accepted scans, always at least one
    pub quantity: u32,
}

/// Point-in-time copy of the cart, keyed by barcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    /// Entries ordered by barcode
    pub entries: BTreeMap<String, CartEntry>,
}

impl Cart {
    /// Quantity recorded for `barcode`, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, barcode: &str) -> u32 {
        self.entries.get(barcode).map_or(0, |entry| entry.quantity)
    }

    /// Number of distinct barcodes in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been scanned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
