//! V4L2 cameras read through `ffmpeg`.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use async_trait::async_trait;
use tokio::{process::Command, time::timeout};
use tracing::{debug, warn};

use super::{CaptureDevice, CaptureDevices, CaptureError, CaptureSettings, Frame};

const FFMPEG: &str = "ffmpeg";

/// Cameras exposed as `/dev/video{index}`.
#[derive(Debug, Clone)]
pub struct FfmpegCameras {
    device_dir: PathBuf,
    settings: CaptureSettings,
}

impl FfmpegCameras {
    /// Cameras under `/dev`.
    #[must_use]
    pub fn new(settings: CaptureSettings) -> Self {
        Self::with_device_dir("/dev", settings)
    }

    /// Look for `video{index}` nodes under `device_dir` instead of `/dev`.
    pub fn with_device_dir(device_dir: impl Into<PathBuf>, settings: CaptureSettings) -> Self {
        Self {
            device_dir: device_dir.into(),
            settings,
        }
    }

    fn device_path(&self, index: u32) -> PathBuf {
        self.device_dir.join(format!("video{index}"))
    }
}

#[async_trait]
impl CaptureDevices for FfmpegCameras {
    async fn open(&self, index: u32) -> Result<Box<dyn CaptureDevice>, CaptureError> {
        let path = self.device_path(index);

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(CaptureError::NotFound(path.display().to_string()));
        }

        let mut camera = FfmpegCamera::new(path, self.settings);

        // A device node can exist while the camera is busy or unplugged.
        camera.read_frame().await?;

        Ok(Box::new(camera))
    }
}

/// A single V4L2 camera; every frame is grabbed by a short-lived `ffmpeg` process.
#[derive(Debug)]
pub struct FfmpegCamera {
    path: PathBuf,
    settings: CaptureSettings,
    released: bool,
}

impl FfmpegCamera {
    /// Camera at `path`, not yet opened.
    #[must_use]
    pub fn new(path: PathBuf, settings: CaptureSettings) -> Self {
        Self {
            path,
            settings,
            released: false,
        }
    }

    /// Device node path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CaptureDevice for FfmpegCamera {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
        self.settings.width = width;
        self.settings.height = height;

        Ok(())
    }

    async fn set_frame_rate(&mut self, frame_rate: u32) -> Result<(), CaptureError> {
        self.settings.frame_rate = frame_rate;

        Ok(())
    }

    async fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        if self.released {
            return Err(CaptureError::Released);
        }

        let video_size = format!("{}x{}", self.settings.width, self.settings.height);
        let frame_rate = self.settings.frame_rate.to_string();

        // kill_on_drop reaps ffmpeg when the timeout drops the wait future.
        let child = Command::new(FFMPEG)
            .args(["-loglevel", "error", "-f", "v4l2"])
            .args(["-video_size", video_size.as_str()])
            .args(["-framerate", frame_rate.as_str()])
            .arg("-i")
            .arg(&self.path)
            .args(["-frames:v", "1", "-f", "image2pipe", "-vcodec", "png", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CaptureError::Spawn {
                program: FFMPEG,
                source,
            })?;

        let output = match timeout(self.settings.frame_timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(CaptureError::Spawn {
                    program: FFMPEG,
                    source,
                });
            }
            Err(_elapsed) => {
                warn!(
                    device = %self.path.display(),
                    timeout_ms = self.settings.frame_timeout.as_millis(),
                    "ffmpeg timed out, process killed"
                );

                return Err(CaptureError::Timeout(self.settings.frame_timeout));
            }
        };

        if !output.status.success() {
            return Err(CaptureError::Process {
                program: FFMPEG,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if output.stdout.is_empty() {
            return Err(CaptureError::EmptyFrame);
        }

        debug!(
            device = %self.path.display(),
            bytes = output.stdout.len(),
            "frame captured"
        );

        Ok(Frame {
            data: output.stdout,
        })
    }

    async fn release(&mut self) {
        self.released = true;
    }
}
