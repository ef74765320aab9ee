//! Scancart JSON API Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, scanning::ScannerStateResponse};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Service status
    pub(crate) status: String,

    /// Number of products in the loaded catalog
    pub(crate) products: usize,

    /// Whether a scan session is running
    pub(crate) scanner: ScannerStateResponse,
}

/// Healthcheck handler
///
/// Reports the catalog size and scanner state alongside the service status.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.state()?;

    let products = state.app.products.list_products().await.len();
    let scanner = state.app.scanner.status().await.state.into();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        products,
        scanner,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use scancart_app::domain::{products::MockProductsService, scanning::ScannerState};

    use crate::test_helpers::{
        APPLES, make_product, scanner_mock, service, state_with, strict_carts_mock,
    };

    use super::*;

    #[tokio::test]
    async fn test_healthcheck() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| vec![make_product(1, APPLES, 299), make_product(2, "42", 150)]);

        let state = state_with(products, strict_carts_mock(), scanner_mock(ScannerState::Idle));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&service(state, Router::with_path("healthcheck").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");
        assert_eq!(response.products, 2);
        assert_eq!(response.scanner, ScannerStateResponse::Idle);

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_without_state_is_500() {
        let response = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(Router::with_path("healthcheck").get(handler)))
            .await;

        assert_eq!(response.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
