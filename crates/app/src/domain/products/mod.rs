//! Products

pub mod catalog;
pub mod data;
pub mod errors;
pub mod models;
pub mod recommendations;
pub mod service;

pub use catalog::Catalog;
pub use errors::{CatalogError, ProductsServiceError};
pub use recommendations::Budget;
pub use service::*;
