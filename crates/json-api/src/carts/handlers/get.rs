//! Get Cart Handler

use std::collections::BTreeMap;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use scancart_app::domain::carts::models::{Cart, CartEntry};

use crate::{extensions::*, products::ProductResponse};

/// Cart Entry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEntryResponse {
    /// The scanned product
    pub product: ProductResponse,

    /// How many times the product was scanned
    pub quantity: u32,
}

impl From<CartEntry> for CartEntryResponse {
    fn from(entry: CartEntry) -> Self {
        Self {
            product: entry.product.into(),
            quantity: entry.quantity,
        }
    }
}

fn into_response(cart: Cart) -> BTreeMap<String, CartEntryResponse> {
    cart.entries
        .into_iter()
        .map(|(barcode, entry)| (barcode, entry.into()))
        .collect()
}

/// Get Cart Handler
///
/// Returns the cart keyed by barcode.
#[endpoint(tags("carts"), summary = "Get Cart")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<BTreeMap<String, CartEntryResponse>>, StatusError> {
    let state = depot.state()?;

    let cart = state.app.carts.get_cart().await;

    Ok(Json(into_response(cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use scancart_app::domain::carts::MockCartsService;

    use crate::test_helpers::{APPLES, make_product, service, state_with_carts};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service(state_with_carts(carts), Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_empty_cart_returns_empty_object() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().once().return_once(Cart::default);
        carts.expect_add_product().never();

        let body = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_string()
            .await?;

        assert_eq!(body, "{}");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_keys_entries_by_barcode() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().once().return_once(|| {
            let mut cart = Cart::default();

            cart.entries.insert(
                APPLES.to_owned(),
                CartEntry {
                    product: make_product(1, APPLES, 299),
                    quantity: 3,
                },
            );

            cart
        });
        carts.expect_add_product().never();

        let response: BTreeMap<String, CartEntryResponse> =
            TestClient::get("http://example.com/cart")
                .send(&make_service(carts))
                .await
                .take_json()
                .await?;

        let entry = response.get(APPLES);

        assert_eq!(entry.map(|entry| entry.quantity), Some(3));
        assert_eq!(entry.map(|entry| entry.product.id), Some(1));

        Ok(())
    }
}
