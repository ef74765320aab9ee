//! Server configuration module

use clap::Parser;

use crate::config::{
    catalog::CatalogConfig, observability::LoggingConfig, scanner::ScannerConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod catalog;
pub(crate) mod observability;
pub(crate) mod scanner;
pub(crate) mod server;

/// Scancart JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "scancart-json", about = "Scancart JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network and static asset settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Product catalog source.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Camera, decoder and scan timing settings.
    #[command(flatten)]
    pub scanner: ScannerConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
