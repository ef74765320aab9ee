//! Scanner Config

use std::{sync::Arc, time::Duration};

use clap::Args;

use scancart_app::{
    capture::{CaptureDevices, CaptureSettings, Decoder, FfmpegCameras, NoCameras, ZbarDecoder},
    domain::scanning::{ScanPolicy, ScannerSettings},
};

/// Where frames come from.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CaptureBackend {
    /// V4L2 cameras read through `ffmpeg`, decoded with `zbarimg`.
    Ffmpeg,

    /// No cameras; scan sessions end immediately.
    None,
}

/// Camera, decoder and scan timing settings.
#[derive(Debug, Args)]
pub struct ScannerConfig {
    /// Capture backend (ffmpeg, none)
    #[arg(long, env = "CAPTURE_BACKEND", value_enum, default_value_t = CaptureBackend::Ffmpeg)]
    pub capture_backend: CaptureBackend,

    /// Requested frame width in pixels
    #[arg(long, env = "CAPTURE_WIDTH", default_value_t = 640_u32)]
    pub capture_width: u32,

    /// Requested frame height in pixels
    #[arg(long, env = "CAPTURE_HEIGHT", default_value_t = 480_u32)]
    pub capture_height: u32,

    /// Requested frames per second
    #[arg(long, env = "CAPTURE_FPS", default_value_t = 15_u32)]
    pub capture_fps: u32,

    /// Longest a single frame grab may take
    #[arg(long, env = "CAPTURE_FRAME_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub capture_frame_timeout_ms: u64,

    /// Minimum gap between any two accepted scans
    #[arg(long, env = "SCAN_RATE_LIMIT_MS", default_value_t = 1_000_u64)]
    pub scan_rate_limit_ms: u64,

    /// Minimum gap before the same barcode is accepted again
    #[arg(long, env = "SCAN_DEBOUNCE_MS", default_value_t = 2_000_u64)]
    pub scan_debounce_ms: u64,

    /// Longest a stop request waits for the capture loop to exit
    #[arg(long, env = "SCAN_STOP_TIMEOUT_MS", default_value_t = 10_000_u64)]
    pub scan_stop_timeout_ms: u64,
}

impl ScannerConfig {
    /// Build scanner settings from the parsed arguments.
    #[must_use]
    pub fn scanner_settings(&self) -> ScannerSettings {
        ScannerSettings {
            capture: CaptureSettings {
                width: self.capture_width,
                height: self.capture_height,
                frame_rate: self.capture_fps,
                frame_timeout: Duration::from_millis(self.capture_frame_timeout_ms),
            },
            policy: ScanPolicy {
                rate_limit: Duration::from_millis(self.scan_rate_limit_ms),
                debounce: Duration::from_millis(self.scan_debounce_ms),
            },
            stop_timeout: Duration::from_millis(self.scan_stop_timeout_ms),
        }
    }

    /// Camera enumerator and decoder for the configured backend.
    #[must_use]
    pub fn capture_adapters(&self) -> (Arc<dyn CaptureDevices>, Arc<dyn Decoder>) {
        let devices: Arc<dyn CaptureDevices> = match self.capture_backend {
            CaptureBackend::Ffmpeg => Arc::new(FfmpegCameras::new(self.scanner_settings().capture)),
            CaptureBackend::None => Arc::new(NoCameras),
        };

        (devices, Arc::new(ZbarDecoder::new()))
    }
}
