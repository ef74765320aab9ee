//! App Router

use std::path::Path;

use salvo::{Router, serve_static::StaticDir};

use crate::{carts, healthcheck, observability, products, scanning};

/// JSON API routes.
pub(crate) fn api_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("products").get(products::index::handler))
        .push(Router::with_path("product/{barcode}").get(products::get::handler))
        .push(Router::with_path("recommendations/{barcode}").get(products::recommendations::handler))
        .push(Router::with_path("cart").get(carts::get::handler))
        .push(Router::with_path("scan").post(scanning::start::handler))
        .push(Router::with_path("scan/status").get(scanning::status::handler))
        .push(Router::with_path("stop").post(scanning::stop::handler))
}

/// Frontend assets; unknown paths fall back to `index.html` for client-side routing.
pub(crate) fn static_router(static_dir: &Path) -> Router {
    Router::with_path("{**path}").get(
        StaticDir::new([static_dir.to_path_buf()])
            .defaults("index.html")
            .fallback("index.html"),
    )
}
