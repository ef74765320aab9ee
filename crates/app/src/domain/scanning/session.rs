//! One capture session: open a device, read frames, feed accepted barcodes to the cart.

use std::sync::Arc;

use tokio::time::{Instant, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    capture::{CaptureDevice, CaptureDevices, CaptureSettings, Decoder, Detection},
    domain::{
        carts::CartsService,
        products::{ProductsService, ProductsServiceError},
        scanning::{
            errors::ScanError,
            policy::{Admission, ScanPolicy, ScanState},
            stats::ScanStats,
        },
    },
};

/// What happened to one detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetectionOutcome {
    Accepted { quantity: u32 },
    RateLimited,
    Debounced,
    LookupMiss,
}

pub(crate) struct ScanSession {
    products: Arc<dyn ProductsService>,
    carts: Arc<dyn CartsService>,
    decoder: Arc<dyn Decoder>,
    policy: ScanPolicy,
    state: ScanState,
    stats: Arc<ScanStats>,
}

impl ScanSession {
    pub(crate) fn new(
        products: Arc<dyn ProductsService>,
        carts: Arc<dyn CartsService>,
        decoder: Arc<dyn Decoder>,
        policy: ScanPolicy,
        stats: Arc<ScanStats>,
    ) -> Self {
        Self {
            products,
            carts,
            decoder,
            policy,
            state: ScanState::new(),
            stats,
        }
    }

    /// Run until cancelled or the device fails. The device is released on every exit path
    /// after it was opened.
    pub(crate) async fn run(
        mut self,
        devices: Arc<dyn CaptureDevices>,
        settings: CaptureSettings,
        cancellation: CancellationToken,
    ) -> Result<(), ScanError> {
        let mut device = open_first_device(devices.as_ref()).await?;

        let result = self
            .capture(device.as_mut(), settings, &cancellation)
            .await;

        device.release().await;

        info!(device = %device.name(), "capture device released");

        result
    }

    async fn capture(
        &mut self,
        device: &mut dyn CaptureDevice,
        settings: CaptureSettings,
        cancellation: &CancellationToken,
    ) -> Result<(), ScanError> {
        device
            .set_resolution(settings.width, settings.height)
            .await
            .map_err(ScanError::Configure)?;

        device
            .set_frame_rate(settings.frame_rate)
            .await
            .map_err(ScanError::Configure)?;

        let mut ticker = interval(settings.frame_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // Cancellation wins over a ready tick so no frame is read after stop.
            tokio::select! {
                biased;
                () = cancellation.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let frame = device.read_frame().await.map_err(ScanError::CaptureRead)?;
            let now = Instant::now();

            self.stats.frame();

            let detections = match self.decoder.decode(&frame).await {
                Ok(detections) => detections,
                Err(error) => {
                    warn!("failed to decode frame: {error}");
                    self.stats.decode_failure();

                    continue;
                }
            };

            self.process_frame(&detections, now).await;
        }

        Ok(())
    }

    /// Apply the policy to every detection of a frame captured at `now`.
    pub(crate) async fn process_frame(
        &mut self,
        detections: &[Detection],
        now: Instant,
    ) -> Vec<DetectionOutcome> {
        let mut outcomes = Vec::with_capacity(detections.len());

        for detection in detections {
            self.stats.detection();

            let outcome = self.process_detection(&detection.text, now).await;

            debug!(
                barcode = %detection.text,
                outline = ?detection.outline(),
                ?outcome,
                "barcode detected"
            );

            outcomes.push(outcome);
        }

        outcomes
    }

    async fn process_detection(&mut self, barcode: &str, now: Instant) -> DetectionOutcome {
        match self.state.admit(&self.policy, barcode, now) {
            Admission::RateLimited => {
                self.stats.rate_limited();

                return DetectionOutcome::RateLimited;
            }
            Admission::Debounced => {
                self.stats.debounced();

                return DetectionOutcome::Debounced;
            }
            Admission::Admit => {}
        }

        let product = match self.products.find_by_barcode(barcode).await {
            Ok(product) => product,
            Err(ProductsServiceError::NotFound) => {
                warn!(barcode, "scanned barcode is not in the catalog");
                self.stats.lookup_miss();

                return DetectionOutcome::LookupMiss;
            }
        };

        let entry = self.carts.add_product(product).await;

        self.state.record_acceptance(barcode, now);
        self.stats.accepted();

        info!(
            barcode,
            product = %entry.product.name,
            quantity = entry.quantity,
            "added scanned product to cart"
        );

        DetectionOutcome::Accepted {
            quantity: entry.quantity,
        }
    }
}

async fn open_first_device(
    devices: &dyn CaptureDevices,
) -> Result<Box<dyn CaptureDevice>, ScanError> {
    let indices = devices.indices();

    for &index in &indices {
        match devices.open(index).await {
            Ok(device) => {
                info!(index, device = %device.name(), "capture device opened");

                return Ok(device);
            }
            Err(error) => debug!(index, "capture device unavailable: {error}"),
        }
    }

    Err(ScanError::DeviceUnavailable {
        attempted: indices.len(),
    })
}
