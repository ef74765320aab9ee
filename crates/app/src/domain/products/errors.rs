//! Products service errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}")]
    Read {
        /// File that failed to load
        path: PathBuf,

        /// Underlying IO failure
        #[source]
        source: io::Error,
    },

    /// The catalog document is not valid YAML or does not match the fixture shape.
    #[error("failed to parse catalog")]
    Parse(#[from] serde_norway::Error),

    /// A price could not be parsed as a non-negative decimal.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(u64),

    /// Two products share a barcode.
    #[error("duplicate barcode {0}")]
    DuplicateBarcode(String),

    /// A product has a blank barcode.
    #[error("product {0} has an empty barcode")]
    EmptyBarcode(u64),
}

/// Errors returned by [`ProductsService`](super::ProductsService) lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductsServiceError {
    /// No product carries the requested barcode.
    #[error("product not found")]
    NotFound,
}
