//! Scancart JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    cors::{Any, Cors},
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use scancart_app::{context::AppContext, domain::products::Catalog};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod carts;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod products;
mod router;
mod scanning;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Scancart JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_logging(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, eprintln is the only channel left"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let catalog = match &config.catalog.catalog_path {
        Some(path) => Catalog::from_path(path).await,
        None => Catalog::builtin(),
    };

    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(load_error) => {
            error!("failed to load product catalog: {load_error}");

            process::exit(1);
        }
    };

    info!(products = catalog.len(), "catalog loaded");

    let (devices, decoder) = config.scanner.capture_adapters();
    let app = AppContext::new(catalog, devices, decoder, config.scanner.scanner_settings());
    let scanner = Arc::clone(&app.scanner);

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(router::api_router());

    let doc = OpenApi::new("Scancart API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
        .push(router::static_router(&config.server.static_dir));

    let cors = Cors::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .into_handler();

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, scanner).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(Service::new(router).hoop(cors)).await;
}
