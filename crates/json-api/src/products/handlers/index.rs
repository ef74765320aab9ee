//! Product Index Handler

use salvo::prelude::*;

use crate::{extensions::*, products::ProductResponse};

/// Product Index Handler
///
/// Returns the whole catalog in load order.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.state()?;

    let products = state.app.products.list_products().await;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use scancart_app::domain::products::MockProductsService;

    use crate::test_helpers::{make_product, service, state_with_products};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service(
            state_with_products(products),
            Router::with_path("products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_products_in_order() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().once().return_once(|| {
            vec![make_product(2, "222", 100), make_product(1, "111", 200)]
        });
        products.expect_find_by_barcode().never();
        products.expect_recommend().never();

        let response: Vec<ProductResponse> = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let ids: Vec<u64> = response.iter().map(|product| product.id).collect();

        assert_eq!(ids, vec![2, 1]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().once().return_once(Vec::new);
        products.expect_find_by_barcode().never();
        products.expect_recommend().never();

        let response: Vec<ProductResponse> = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(response.is_empty(), "expected no products");

        Ok(())
    }
}
