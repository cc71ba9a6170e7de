//! Integration build use cases

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use camelk_core::application::errors::{CatalogError, InspectError};
use camelk_core::config::{Config, ImageConfig};
use camelk_core::domain::{CAMEL_K_GROUP, Dependency, IntegrationMetadata, MavenProject, SourceSpec};
use camelk_core::infrastructure::{InspectorFactory, RuntimeCatalog, load_configured_catalog};

use crate::services::{
    DependencyError, DependencyManager, DependencyWarning, lookup_predefined_image,
    normalize_dependencies, sanitize_dependencies, validate_dependencies,
};

/// Coordinates of the generated integration project
pub const INTEGRATION_GROUP_ID: &str = "org.apache.camel.k.integration";
pub const INTEGRATION_ARTIFACT_ID: &str = "camel-k-integration";

/// BOM pinning every Camel K runtime artifact
const RUNTIME_BOM_ARTIFACT_ID: &str = "camel-k-runtime-bom";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Source inspection failed: {0}")]
    Inspect(#[from] InspectError),

    #[error("Dependency resolution failed: {0}")]
    Dependency(#[from] DependencyError),
}

/// Outcome of planning an integration build
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationBuild {
    pub metadata: IntegrationMetadata,
    /// Every dependency identifier the build resolves, sorted
    pub dependencies: Vec<String>,
    pub project: MavenProject,
    pub warnings: Vec<DependencyWarning>,
    /// Prebuilt image usable instead of a build, if any
    pub predefined_image: Option<String>,
}

/// Use case turning integration sources into a Maven project
pub struct IntegrationBuildUseCase {
    catalog: Arc<RuntimeCatalog>,
    inspectors: InspectorFactory,
    dependency_manager: DependencyManager,
    images: ImageConfig,
}

impl IntegrationBuildUseCase {
    /// Create a new use case instance bound to `catalog`
    pub fn new(catalog: Arc<RuntimeCatalog>, config: &Config) -> Self {
        Self {
            inspectors: InspectorFactory::new(catalog.clone()),
            dependency_manager: DependencyManager::new(config.maven.clone()),
            images: config.images.clone(),
            catalog,
        }
    }

    /// Create a use case over the catalog the configuration selects
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let catalog = load_configured_catalog(&config.catalog)?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn catalog(&self) -> &RuntimeCatalog {
        &self.catalog
    }

    /// Inspect `sources`, add `extra_dependencies` and the runtime's own
    /// dependencies, and resolve them all into a Maven project.
    pub fn execute<S: AsRef<str>>(
        &self,
        sources: &[SourceSpec],
        extra_dependencies: &[S],
    ) -> Result<IntegrationBuild, BuildError> {
        let metadata = self.inspectors.extract_sources(sources)?;

        let extra = normalize_dependencies(extra_dependencies);
        let warnings = validate_dependencies(&self.catalog, &extra);

        let runtime_dependencies = self
            .catalog
            .runtime()
            .dependencies
            .iter()
            .map(|artifact| artifact.dependency_id());
        let dependencies: BTreeSet<String> = metadata
            .dependencies
            .iter()
            .cloned()
            .chain(extra)
            .chain(runtime_dependencies)
            .collect();
        let dependencies: Vec<String> = dependencies.into_iter().collect();
        debug!(count = dependencies.len(), "Resolving integration dependencies");

        let mut project = MavenProject::new_with_gav(
            INTEGRATION_GROUP_ID,
            INTEGRATION_ARTIFACT_ID,
            self.catalog.runtime_version(),
        );
        project.dependency_management.push(Dependency {
            kind: "pom".to_string(),
            scope: "import".to_string(),
            ..Dependency::new(CAMEL_K_GROUP, RUNTIME_BOM_ARTIFACT_ID, self.catalog.runtime_version())
        });

        self.dependency_manager
            .manage(&mut project, &dependencies, &self.catalog)?;
        sanitize_dependencies(&mut project.dependencies);

        let predefined_image = lookup_predefined_image(&self.catalog, &dependencies, &self.images);

        info!(
            sources = metadata.sources.len(),
            dependencies = project.dependencies.len(),
            warnings = warnings.len(),
            runtime_version = %self.catalog.runtime_version(),
            "Planned integration build"
        );

        Ok(IntegrationBuild {
            metadata,
            dependencies,
            project,
            warnings,
            predefined_image,
        })
    }
}
