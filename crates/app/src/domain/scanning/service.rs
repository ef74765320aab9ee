//! Scanner service: starts, stops and reports on capture sessions.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::{sync::Mutex, time::timeout};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span, warn};

use crate::{
    capture::{CaptureDevices, CaptureSettings, Decoder},
    domain::{
        carts::CartsService,
        products::ProductsService,
        scanning::{
            errors::ScanError,
            policy::ScanPolicy,
            session::ScanSession,
            stats::{ScanStats, ScanStatsSnapshot},
        },
    },
};

/// Result of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// A running session was stopped and its device released.
    Stopped,

    /// Nothing was running.
    NotRunning,
}

/// Lifecycle state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    /// No capture loop is active.
    Idle,

    /// A capture loop is reading frames.
    Running,
}

/// Scanner state plus counters of the current or most recent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStatus {
    /// Lifecycle state
    pub state: ScannerState,

    /// When the current or most recent session started
    pub started_at: Option<Timestamp>,

    /// Counters of the current or most recent session
    pub stats: ScanStatsSnapshot,
}

/// Tunables for capture sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerSettings {
    /// Device configuration and frame pacing
    pub capture: CaptureSettings,

    /// Acceptance windows
    pub policy: ScanPolicy,

    /// Longest a stop request waits for the loop to exit
    pub stop_timeout: Duration,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            capture: CaptureSettings::default(),
            policy: ScanPolicy::default(),
            stop_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
struct ActiveSession {
    cancellation: CancellationToken,
    /// Cancelled by the session task once its device is released, panics included.
    exited: CancellationToken,
    stats: Arc<ScanStats>,
    started_at: Timestamp,
}

impl ActiveSession {
    fn is_running(&self) -> bool {
        !self.exited.is_cancelled()
    }
}

/// [`ScannerService`] running at most one capture session as a background task.
pub struct ScanController {
    products: Arc<dyn ProductsService>,
    carts: Arc<dyn CartsService>,
    devices: Arc<dyn CaptureDevices>,
    decoder: Arc<dyn Decoder>,
    settings: ScannerSettings,
    session: Mutex<Option<ActiveSession>>,
}

impl ScanController {
    /// Controller with no session running yet.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        carts: Arc<dyn CartsService>,
        devices: Arc<dyn CaptureDevices>,
        decoder: Arc<dyn Decoder>,
        settings: ScannerSettings,
    ) -> Self {
        Self {
            products,
            carts,
            devices,
            decoder,
            settings,
            session: Mutex::new(None),
        }
    }
}

impl Debug for ScanController {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ScanController")
            .field("devices", &self.devices)
            .field("decoder", &self.decoder)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ScannerService for ScanController {
    async fn start(&self) -> Result<(), ScanError> {
        let mut session = self.session.lock().await;

        if session.as_ref().is_some_and(ActiveSession::is_running) {
            return Err(ScanError::AlreadyRunning);
        }

        let cancellation = CancellationToken::new();
        let stats = Arc::new(ScanStats::default());
        let started_at = Timestamp::now();

        let worker = ScanSession::new(
            Arc::clone(&self.products),
            Arc::clone(&self.carts),
            Arc::clone(&self.decoder),
            self.settings.policy,
            Arc::clone(&stats),
        );

        let devices = Arc::clone(&self.devices);
        let capture = self.settings.capture;
        let token = cancellation.clone();
        let exited = CancellationToken::new();
        let exit_guard = exited.clone().drop_guard();

        tokio::spawn(
            async move {
                let _exit_guard = exit_guard;

                match worker.run(devices, capture, token).await {
                    Ok(()) => info!("scan session finished"),
                    Err(error) => error!("scan session ended: {error}"),
                }
            }
            .instrument(info_span!("scan.session", %started_at)),
        );

        info!(%started_at, "scan session started");

        *session = Some(ActiveSession {
            cancellation,
            exited,
            stats,
            started_at,
        });

        Ok(())
    }

    async fn stop(&self) -> Result<StopOutcome, ScanError> {
        // The lock is released before waiting so status and start stay responsive.
        let exited = {
            let session = self.session.lock().await;

            let Some(active) = session.as_ref().filter(|active| active.is_running()) else {
                info!("stop requested with no active scan session");

                return Ok(StopOutcome::NotRunning);
            };

            active.cancellation.cancel();
            active.exited.clone()
        };

        match timeout(self.settings.stop_timeout, exited.cancelled()).await {
            Ok(()) => {
                info!("scan session stopped on request");

                Ok(StopOutcome::Stopped)
            }
            Err(_elapsed) => {
                warn!(
                    timeout_ms = self.settings.stop_timeout.as_millis(),
                    "scan session did not stop in time"
                );

                Err(ScanError::StopTimeout(self.settings.stop_timeout))
            }
        }
    }

    async fn status(&self) -> ScanStatus {
        let session = self.session.lock().await;

        match session.as_ref() {
            Some(active) => ScanStatus {
                state: if active.is_running() {
                    ScannerState::Running
                } else {
                    ScannerState::Idle
                },
                started_at: Some(active.started_at),
                stats: active.stats.snapshot(),
            },
            None => ScanStatus {
                state: ScannerState::Idle,
                started_at: None,
                stats: ScanStatsSnapshot::default(),
            },
        }
    }
}

/// Capture session lifecycle.
#[automock]
#[async_trait]
pub trait ScannerService: Send + Sync {
    /// Start a capture session in the background.
    ///
    /// Returns once the session task is spawned; device failures are logged
    /// by the session and end it without reaching the caller.
    async fn start(&self) -> Result<(), ScanError>;

    /// Signal the running session to stop and wait for it to release its device.
    async fn stop(&self) -> Result<StopOutcome, ScanError>;

    /// Current lifecycle state and counters.
    async fn status(&self) -> ScanStatus;
}
