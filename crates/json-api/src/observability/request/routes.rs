//! Route labels for metrics and logs.
//!
//! Labels come from a fixed set so client-chosen paths cannot grow the
//! metric label space.

const FIXED_ROUTES: &[&str] = &[
    "/",
    "/products",
    "/cart",
    "/scan",
    "/stop",
    "/scan/status",
    "/healthcheck",
    "/metrics",
    "/api-doc/openapi.json",
];

const BARCODE_ROUTES: &[(&str, &str)] = &[
    ("product", "/product/{barcode}"),
    ("recommendations", "/recommendations/{barcode}"),
];

const DOCS_ROUTE: &str = "/docs";
const STATIC_ROUTE: &str = "/{**path}";

/// Map a request path onto the route template that serves it.
pub(super) fn route_label(path: &str) -> &'static str {
    let trimmed = path.trim_end_matches('/');
    let trimmed = if trimmed.is_empty() { "/" } else { trimmed };

    if let Some(route) = FIXED_ROUTES.iter().find(|route| **route == trimmed) {
        return route;
    }

    if trimmed == DOCS_ROUTE || trimmed.starts_with("/docs/") {
        return DOCS_ROUTE;
    }

    let mut segments = trimmed.trim_start_matches('/').split('/');

    if let (Some(prefix), Some(barcode), None) = (segments.next(), segments.next(), segments.next())
        && !barcode.is_empty()
        && let Some((_, route)) = BARCODE_ROUTES.iter().find(|(name, _)| *name == prefix)
    {
        return route;
    }

    STATIC_ROUTE
}
