//! Catalog loading from the embedded resource or from disk

use std::path::Path;
use tracing::{debug, info};

use crate::application::errors::CatalogError;
use crate::config::CatalogConfig;
use crate::domain::CamelCatalog;
use crate::infrastructure::catalog::RuntimeCatalog;

/// Catalog shipped with the engine
const DEFAULT_CATALOG: &str = include_str!("../../../resources/camel-catalog.yaml");

/// Parse a `CamelCatalog` YAML document
pub fn parse_catalog(content: &str) -> Result<CamelCatalog, CatalogError> {
    Ok(serde_yaml::from_str(content)?)
}

/// The embedded catalog resource, parsed on each call
pub fn default_catalog_resource() -> Result<CamelCatalog, CatalogError> {
    parse_catalog(DEFAULT_CATALOG)
}

/// Build an indexed catalog from the embedded resource
pub fn load_default_catalog() -> Result<RuntimeCatalog, CatalogError> {
    let catalog = default_catalog_resource()?;
    debug!(name = %catalog.metadata.name, "Loaded embedded catalog");
    Ok(RuntimeCatalog::new(catalog.spec))
}

pub fn load_catalog_file(path: &Path) -> Result<CamelCatalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content)
}

/// Load the catalog named by the configuration, or the embedded one
pub fn load_configured_catalog(config: &CatalogConfig) -> Result<RuntimeCatalog, CatalogError> {
    match &config.path {
        Some(path) => {
            let catalog = load_catalog_file(path)?;
            info!(
                path = %path.display(),
                runtime_version = %catalog.spec.runtime.version,
                "Loaded catalog from file"
            );
            Ok(RuntimeCatalog::new(catalog.spec))
        }
        None => load_default_catalog(),
    }
}
