//! Start Scan Handler

use salvo::prelude::*;
use tracing::{error, info};

use scancart_app::domain::scanning::ScanError;

use crate::{
    extensions::*,
    observability::{ScanCommand, observe_scan_command},
    scanning::models::{CommandStatus, ScanResponse},
};

/// Start Scan Handler
///
/// Starts a background capture session. Device problems surface in the logs
/// and in `/scan/status`, not here.
#[endpoint(
    tags("scanning"),
    summary = "Start Scanning",
    responses(
        (status_code = 200, description = "Session started", body = ScanResponse),
        (status_code = 409, description = "A session is already running", body = ScanResponse),
    )
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ScanResponse>, StatusError> {
    let state = depot.state()?;

    let response = match state.app.scanner.start().await {
        Ok(()) => {
            info!("scan session requested");

            ScanResponse::new("Barcode scanning started", CommandStatus::Success)
        }
        Err(ScanError::AlreadyRunning) => {
            res.status_code(StatusCode::CONFLICT);

            ScanResponse::new("Barcode scanning is already running", CommandStatus::Error)
        }
        Err(source) => {
            error!("failed to start scanning: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            ScanResponse::new("Barcode scanning could not be started", CommandStatus::Error)
        }
    };

    observe_scan_command(ScanCommand::Start, response.status.as_str());

    Ok(Json(response))
}
