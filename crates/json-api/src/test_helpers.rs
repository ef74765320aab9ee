//! Test helpers.

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use scancart_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService,
        products::{MockProductsService, models::Product},
        scanning::{MockScannerService, ScanStatsSnapshot, ScanStatus, ScannerState},
    },
};

use crate::state::State;

pub(crate) const APPLES: &str = "6430757015189";

pub(crate) fn make_product(id: u64, barcode: &str, price_cents: i64) -> Product {
    Product {
        id,
        barcode: barcode.to_owned(),
        name: format!("Product {id}"),
        description: String::new(),
        category: "Fruits".into(),
        price: Decimal::new(price_cents, 2),
        image_path: format!("images/{barcode}.png"),
        eco_friendly: id % 2 == 1,
    }
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_find_by_barcode().never();
    products.expect_recommend().never();

    products
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_product().never();
    carts.expect_get_cart().never();

    carts
}

pub(crate) fn strict_scanner_mock() -> MockScannerService {
    let mut scanner = MockScannerService::new();

    scanner.expect_start().never();
    scanner.expect_stop().never();
    scanner.expect_status().never();

    scanner
}

/// Scanner mock that only answers status requests.
pub(crate) fn scanner_mock(state: ScannerState) -> MockScannerService {
    let mut scanner = MockScannerService::new();

    scanner.expect_start().never();
    scanner.expect_stop().never();
    scanner.expect_status().returning(move || ScanStatus {
        state,
        started_at: None,
        stats: ScanStatsSnapshot {
            frames: 12,
            accepted: 1,
            ..ScanStatsSnapshot::default()
        },
    });

    scanner
}

pub(crate) fn state_with(
    products: MockProductsService,
    carts: MockCartsService,
    scanner: MockScannerService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
        scanner: Arc::new(scanner),
    })
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    state_with(products, strict_carts_mock(), strict_scanner_mock())
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    state_with(strict_products_mock(), carts, strict_scanner_mock())
}

pub(crate) fn state_with_scanner(scanner: MockScannerService) -> Arc<State> {
    state_with(strict_products_mock(), strict_carts_mock(), scanner)
}

pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
