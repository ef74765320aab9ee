//! Per-session scan counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by a running session and read by status queries.
#[derive(Debug, Default)]
pub struct ScanStats {
    frames: AtomicU64,
    detections: AtomicU64,
    accepted: AtomicU64,
    rate_limited: AtomicU64,
    debounced: AtomicU64,
    lookup_misses: AtomicU64,
    decode_failures: AtomicU64,
}

/// Copy of [`ScanStats`] at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStatsSnapshot {
    /// Frames read from the device
    pub frames: u64,

    /// Barcodes reported by the decoder
    pub detections: u64,

    /// Barcodes added to the cart
    pub accepted: u64,

    /// Barcodes skipped by the global rate limit
    pub rate_limited: u64,

    /// Barcodes skipped by the per-barcode debounce
    pub debounced: u64,

    /// Barcodes with no catalog entry
    pub lookup_misses: u64,

    /// Frames the decoder failed on
    pub decode_failures: u64,
}

impl ScanStats {
    pub(crate) fn frame(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn detection(&self) {
        self.detections.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn debounced(&self) {
        self.debounced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn lookup_miss(&self) {
        self.lookup_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counter values.
    #[must_use]
    pub fn snapshot(&self) -> ScanStatsSnapshot {
        ScanStatsSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            detections: self.detections.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
            debounced: self.debounced.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
        }
    }
}
