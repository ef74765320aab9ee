//! Catalog, cart and barcode scanning domain for the scancart point-of-sale backend.

pub mod capture;
pub mod context;
pub mod domain;

#[cfg(test)]
mod test;
