//! Scan Status Handler

use salvo::prelude::*;

use crate::{extensions::*, scanning::models::ScanStatusResponse};

/// Scan Status Handler
///
/// Reports whether a session is running plus its counters.
#[endpoint(tags("scanning"), summary = "Scan Status")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ScanStatusResponse>, StatusError> {
    let state = depot.state()?;

    Ok(Json(state.app.scanner.status().await.into()))
}
