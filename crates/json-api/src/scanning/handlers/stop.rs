//! Stop Scan Handler

use salvo::prelude::*;
use tracing::{error, warn};

use scancart_app::domain::scanning::{ScanError, StopOutcome};

use crate::{
    extensions::*,
    observability::{ScanCommand, observe_scan_command},
    scanning::models::{CommandStatus, ScanResponse},
};

/// Stop Scan Handler
///
/// Stops the active capture session and waits for the camera to be released.
#[endpoint(
    tags("scanning"),
    summary = "Stop Scanning",
    responses(
        (status_code = 200, description = "Session stopped, or nothing to stop", body = ScanResponse),
        (status_code = 504, description = "The session did not stop in time", body = ScanResponse),
    )
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ScanResponse>, StatusError> {
    let state = depot.state()?;

    let response = match state.app.scanner.stop().await {
        Ok(StopOutcome::Stopped) => {
            ScanResponse::new("Barcode scanning stopped", CommandStatus::Success)
        }
        Ok(StopOutcome::NotRunning) => {
            ScanResponse::new("No active scan to stop", CommandStatus::Info)
        }
        Err(ScanError::StopTimeout(waited)) => {
            warn!(
                waited_ms = waited.as_millis(),
                "scan session did not stop in time"
            );
            res.status_code(StatusCode::GATEWAY_TIMEOUT);

            ScanResponse::new(
                "Barcode scanning did not stop in time",
                CommandStatus::Error,
            )
        }
        Err(source) => {
            error!("failed to stop scanning: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            ScanResponse::new("Barcode scanning could not be stopped", CommandStatus::Error)
        }
    };

    observe_scan_command(ScanCommand::Stop, response.status.as_str());

    Ok(Json(response))
}
