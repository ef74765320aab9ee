//! Catalog Config

use std::path::PathBuf;

use clap::Args;

/// Product catalog source.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// YAML catalog to load instead of the bundled one
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog_path: Option<PathBuf>,
}
