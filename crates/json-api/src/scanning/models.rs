//! Scanning Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use scancart_app::domain::scanning::{ScanStatsSnapshot, ScanStatus, ScannerState};

/// Outcome class of a scanner command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CommandStatus {
    /// The command took effect
    Success,

    /// Nothing needed doing
    Info,

    /// The command failed
    Error,
}

impl CommandStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// Scanner command response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScanResponse {
    /// Human readable result
    pub message: String,

    /// Result class
    pub status: CommandStatus,
}

impl ScanResponse {
    pub(crate) fn new(message: impl Into<String>, status: CommandStatus) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

/// Session counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScanStatsResponse {
    /// Frames read from the camera
    pub frames: u64,

    /// Barcodes decoded across all frames
    pub detections: u64,

    /// Scans added to the cart
    pub accepted: u64,

    /// Scans skipped by the global rate limit
    pub rate_limited: u64,

    /// Scans skipped as repeats of a recent barcode
    pub debounced: u64,

    /// Decoded barcodes missing from the catalog
    pub lookup_misses: u64,

    /// Frames the decoder could not process
    pub decode_failures: u64,
}

impl From<ScanStatsSnapshot> for ScanStatsResponse {
    fn from(stats: ScanStatsSnapshot) -> Self {
        Self {
            frames: stats.frames,
            detections: stats.detections,
            accepted: stats.accepted,
            rate_limited: stats.rate_limited,
            debounced: stats.debounced,
            lookup_misses: stats.lookup_misses,
            decode_failures: stats.decode_failures,
        }
    }
}

/// Scanner lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ScannerStateResponse {
    /// No session is active
    Idle,

    /// A session is reading frames
    Running,
}

impl From<ScannerState> for ScannerStateResponse {
    fn from(state: ScannerState) -> Self {
        match state {
            ScannerState::Idle => Self::Idle,
            ScannerState::Running => Self::Running,
        }
    }
}

/// Scanner status response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScanStatusResponse {
    /// Lifecycle state
    pub state: ScannerStateResponse,

    /// Start time of the current or most recent session
    pub started_at: Option<String>,

    /// Counters of the current or most recent session
    pub stats: ScanStatsResponse,
}

impl From<ScanStatus> for ScanStatusResponse {
    fn from(status: ScanStatus) -> Self {
        Self {
            state: status.state.into(),
            started_at: status.started_at.as_ref().map(ToString::to_string),
            stats: status.stats.into(),
        }
    }
}
