//! Scanning errors.

use std::time::Duration;

use thiserror::Error;

use crate::capture::CaptureError;

/// Errors raised while starting, running or stopping a scan session.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A session is already reading frames.
    #[error("a scan session is already running")]
    AlreadyRunning,

    /// None of the tried devices could be opened.
    #[error("no capture device could be opened ({attempted} tried)")]
    DeviceUnavailable {
        /// Number of device indices tried
        attempted: usize,
    },

    /// The opened device rejected its resolution or frame rate.
    #[error("failed to configure capture device")]
    Configure(#[source] CaptureError),

    /// Reading a frame failed mid-session.
    #[error("failed to read frame from capture device")]
    CaptureRead(#[source] CaptureError),

    /// The session did not exit within the stop timeout.
    #[error("scan session did not stop within {0:?}")]
    StopTimeout(Duration),
}
