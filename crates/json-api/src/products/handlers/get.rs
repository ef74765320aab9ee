//! Get Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{
        ProductResponse,
        errors::{ErrorResponse, render_error},
    },
};

/// Get Product Handler
///
/// Looks up a single product by barcode.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = 200, description = "The product", body = ProductResponse),
        (status_code = 404, description = "Unknown barcode", body = ErrorResponse),
    )
)]
pub(crate) async fn handler(
    barcode: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;

    match state.app.products.find_by_barcode(&barcode.into_inner()).await {
        Ok(product) => res.render(Json(ProductResponse::from(product))),
        Err(error) => render_error(res, &error),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use scancart_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{APPLES, make_product, service, state_with_products};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service(
            state_with_products(products),
            Router::with_path("product/{barcode}").get(handler),
        )
    }

    fn products_mock() -> MockProductsService {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();
        products.expect_recommend().never();

        products
    }

    #[tokio::test]
    async fn test_get_returns_product() -> TestResult {
        let mut products = products_mock();

        products
            .expect_find_by_barcode()
            .once()
            .withf(|barcode| barcode == APPLES)
            .return_once(|_| Ok(make_product(1, APPLES, 299)));

        let mut res = TestClient::get(format!("http://example.com/product/{APPLES}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let product: ProductResponse = res.take_json().await?;

        assert_eq!(product.id, 1);
        assert_eq!(product.barcode, APPLES);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_barcode_returns_404_body() -> TestResult {
        let mut products = products_mock();

        products
            .expect_find_by_barcode()
            .once()
            .withf(|barcode| barcode == "0000000000000")
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let mut res = TestClient::get("http://example.com/product/0000000000000")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "Product not found");

        Ok(())
    }
}
