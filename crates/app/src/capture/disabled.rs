//! Capture backend used when no camera is configured.

use async_trait::async_trait;

use super::{CaptureDevice, CaptureDevices, CaptureError};

/// Reports every device as unavailable, so scan sessions end immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCameras;

#[async_trait]
impl CaptureDevices for NoCameras {
    async fn open(&self, _index: u32) -> Result<Box<dyn CaptureDevice>, CaptureError> {
        Err(CaptureError::Disabled)
    }
}
