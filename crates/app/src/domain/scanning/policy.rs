//! Rate limit and debounce policy for decoded barcodes.
//!
//! Two gates run before a detection may touch the cart:
//!
//! - the global rate limit rejects any barcode while the previous acceptance
//!   (of any barcode) is younger than [`ScanPolicy::rate_limit`];
//! - the per-barcode debounce rejects a barcode whose own last acceptance is
//!   younger than [`ScanPolicy::debounce`], so an item left in front of the
//!   camera is counted once.
//!
//! Only accepted barcodes are recorded. A barcode missing from the catalog
//! leaves the state untouched and may be retried on the next frame.

use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::time::Instant;

/// Acceptance windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPolicy {
    /// Minimum gap between two acceptances of any barcodes
    pub rate_limit: Duration,

    /// Minimum gap between two acceptances of the same barcode
    pub debounce: Duration,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            rate_limit: Duration::from_secs(1),
            debounce: Duration::from_secs(2),
        }
    }
}

/// Verdict for one detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Resolve the barcode and add it to the cart.
    Admit,

    /// Another barcode was accepted too recently.
    RateLimited,

    /// This barcode was accepted too recently.
    Debounced,
}

/// Per-session bookkeeping of accepted barcodes.
#[derive(Debug, Default)]
pub struct ScanState {
    last_accepted: Option<Instant>,
    last_seen: FxHashMap<String, Instant>,
}

impl ScanState {
    /// Empty state: nothing accepted yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `barcode`, detected at `now`, may be accepted.
    #[must_use]
    pub fn admit(&self, policy: &ScanPolicy, barcode: &str, now: Instant) -> Admission {
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < policy.rate_limit
        {
            return Admission::RateLimited;
        }

        if let Some(last) = self.last_seen.get(barcode)
            && now.saturating_duration_since(*last) < policy.debounce
        {
            return Admission::Debounced;
        }

        Admission::Admit
    }

    /// Record that `barcode` was added to the cart at `now`.
    pub fn record_acceptance(&mut self, barcode: &str, now: Instant) {
        self.last_accepted = Some(now);

        self.last_seen.insert(barcode.to_string(), now);
    }

    /// When any barcode was last accepted.
    #[must_use]
    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}
