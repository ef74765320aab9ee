//! Capture devices and barcode decoders.
//!
//! Both are external capabilities: the scan loop only depends on the
//! [`CaptureDevices`], [`CaptureDevice`] and [`Decoder`] traits. Adapters shell
//! out to `ffmpeg` for frames and `zbarimg` for decoding.

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use smallvec::SmallVec;
use thiserror::Error;

mod disabled;
mod ffmpeg;
mod zbar;

pub use disabled::NoCameras;
pub use ffmpeg::{FfmpegCamera, FfmpegCameras};
pub use zbar::ZbarDecoder;

/// Device indices tried when a session starts.
pub const DEFAULT_DEVICE_INDICES: [u32; 3] = [0, 1, 2];

/// Errors raised by capture devices.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Capturing is switched off in configuration.
    #[error("capture is disabled")]
    Disabled,

    /// No device exists at the given location.
    #[error("capture device {0} not found")]
    NotFound(String),

    /// A helper process could not be started or waited on.
    #[error("failed to run {program}")]
    Spawn {
        /// Program that failed
        program: &'static str,

        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// The helper process exited unsuccessfully.
    #[error("{program} failed: {stderr}")]
    Process {
        /// Program that failed
        program: &'static str,

        /// Trimmed standard error output
        stderr: String,
    },

    /// The device was released and can no longer be read.
    #[error("capture device has been released")]
    Released,

    /// The device produced no image data.
    #[error("capture device returned an empty frame")]
    EmptyFrame,

    /// Reading a frame took longer than allowed.
    #[error("frame capture timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors raised by decoders.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The decoder process could not be started or fed.
    #[error("failed to run {program}")]
    Spawn {
        /// Program that failed
        program: &'static str,

        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// The decoder exited unsuccessfully.
    #[error("{program} failed: {stderr}")]
    Process {
        /// Program that failed
        program: &'static str,

        /// Trimmed standard error output
        stderr: String,
    },
}

/// Capture resolution and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Target frames per second
    pub frame_rate: u32,

    /// Longest a single frame read may take
    pub frame_timeout: Duration,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_rate: 15,
            frame_timeout: Duration::from_secs(5),
        }
    }
}

impl CaptureSettings {
    /// Time between frames at the configured frame rate.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

/// One encoded image read from a capture device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Encoded image bytes (PNG for the ffmpeg adapter)
    pub data: Vec<u8>,
}

/// Pixel coordinate of a barcode outline corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Horizontal offset from the left edge
    pub x: i32,

    /// Vertical offset from the top edge
    pub y: i32,
}

/// A barcode found in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Decoded symbol text
    pub text: String,

    /// Outline of the symbol, empty when the decoder reports no geometry
    pub polygon: SmallVec<[Point; 4]>,
}

impl Detection {
    /// Detection without geometry.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            polygon: SmallVec::new(),
        }
    }

    /// Attach outline points.
    #[must_use]
    pub fn with_polygon(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.polygon = points.into_iter().collect();
        self
    }

    /// At most the first four outline points, enough to draw a quadrilateral.
    #[must_use]
    pub fn outline(&self) -> &[Point] {
        let len = self.polygon.len().min(4);

        self.polygon.get(..len).unwrap_or_default()
    }
}

/// Source of capture devices addressed by index.
#[async_trait]
pub trait CaptureDevices: Send + Sync + Debug {
    /// Indices to try, in order.
    fn indices(&self) -> Vec<u32> {
        DEFAULT_DEVICE_INDICES.to_vec()
    }

    /// Open the device at `index`.
    async fn open(&self, index: u32) -> Result<Box<dyn CaptureDevice>, CaptureError>;
}

/// An opened capture device.
#[async_trait]
pub trait CaptureDevice: Send + Debug {
    /// Human-readable device name for logs.
    fn name(&self) -> String;

    /// Request a capture resolution.
    async fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), CaptureError>;

    /// Request a capture frame rate.
    async fn set_frame_rate(&mut self, frame_rate: u32) -> Result<(), CaptureError>;

    /// Read the next frame.
    async fn read_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Release the device. Further reads are not allowed.
    async fn release(&mut self);
}

/// Barcode decoder.
#[async_trait]
pub trait Decoder: Send + Sync + Debug {
    /// Every barcode visible in `frame`.
    async fn decode(&self, frame: &Frame) -> Result<Vec<Detection>, DecodeError>;
}
