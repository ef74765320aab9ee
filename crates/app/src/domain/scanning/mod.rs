//! Barcode scanning: capture loop lifecycle and acceptance policy.

pub mod errors;
pub mod policy;
pub mod service;
mod session;
pub mod stats;

pub use errors::ScanError;
pub use policy::{Admission, ScanPolicy, ScanState};
pub use service::*;
pub use stats::{ScanStats, ScanStatsSnapshot};
