//! Resolution of dependency identifiers into Maven project dependencies

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use camelk_core::application::errors::MavenError;
use camelk_core::config::MavenConfig;
use camelk_core::domain::{
    CAMEL_GROUP, CAMEL_K_GROUP, CAMEL_QUARKUS_GROUP, Dependency, Exclusion, MavenProject, Repository,
    RepositoryPolicy, RuntimeProvider, parse_gav,
};
use camelk_core::infrastructure::RuntimeCatalog;

use crate::services::jitpack;

/// Coordinate that drags in a JDK-only artifact through its POM
const JOLOKIA_JVM: &str = "org.jolokia:jolokia-jvm";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("unknown dependency type: {id}")]
    UnknownDependencyType { id: String },

    #[error(transparent)]
    Maven(#[from] MavenError),
}

/// Turns the dependency identifiers of an integration into Maven
/// dependencies, managed imports and repositories.
#[derive(Debug, Clone)]
pub struct DependencyManager {
    config: MavenConfig,
}

impl Default for DependencyManager {
    fn default() -> Self {
        Self::new(MavenConfig::default())
    }
}

impl DependencyManager {
    pub fn new(config: MavenConfig) -> Self {
        Self { config }
    }

    /// Add every identifier to `project`, then the transitive catalog
    /// dependencies and finally the catalog exclusions.
    ///
    /// Stops at the first identifier that cannot be resolved; identifiers
    /// processed before it stay in the project. A malformed `mvn:` or `bom:`
    /// coordinate is such an identifier and aborts the build with
    /// [`DependencyError::Maven`].
    pub fn manage<I, S>(
        &self,
        project: &mut MavenProject,
        dependencies: I,
        catalog: &RuntimeCatalog,
    ) -> Result<(), DependencyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for dependency in dependencies {
            self.add_dependency(project, dependency.as_ref(), catalog)?;
        }
        add_dependencies_from_catalog(project, catalog);
        add_catalog_exclusions(project, catalog);
        Ok(())
    }

    fn add_dependency(
        &self,
        project: &mut MavenProject,
        id: &str,
        catalog: &RuntimeCatalog,
    ) -> Result<(), DependencyError> {
        if let Some(gav) = id.strip_prefix("bom:") {
            let bom = parse_gav(gav)?;
            project.dependency_management.push(Dependency {
                kind: "pom".to_string(),
                scope: "import".to_string(),
                ..Dependency::new(bom.group_id, bom.artifact_id, bom.version)
            });
        } else if let Some(name) = id.strip_prefix("camel:") {
            match catalog.runtime_provider() {
                RuntimeProvider::Quarkus => {
                    let artifact_id = with_prefix(name, "camel-", "camel-quarkus-");
                    project.add_dependency_gav(CAMEL_QUARKUS_GROUP, &artifact_id, "");
                }
                RuntimeProvider::Main => {
                    let artifact_id = with_prefix(name, "camel-", "camel-");
                    project.add_dependency_gav(CAMEL_GROUP, &artifact_id, "");
                }
            }
        } else if let Some(name) = id.strip_prefix("camel-k:") {
            let artifact_id = with_prefix(name, "camel-k-", "camel-k-");
            project.add_dependency_gav(CAMEL_K_GROUP, &artifact_id, "");
        } else if let Some(name) = id.strip_prefix("camel-quarkus:") {
            let artifact_id = with_prefix(name, "camel-quarkus-", "camel-quarkus-");
            project.add_dependency_gav(CAMEL_QUARKUS_GROUP, &artifact_id, "");
        } else if let Some(gav) = id.strip_prefix("mvn:") {
            let mut dependency = parse_gav(gav)?;
            if gav.contains(JOLOKIA_JVM) {
                dependency.exclusions.push(Exclusion::new("com.sun", "tools"));
            }
            project.add_dependency(dependency);
        } else {
            let dependency = jitpack::to_dependency(id, &self.config.jitpack_default_version)
                .ok_or_else(|| DependencyError::UnknownDependencyType { id: id.to_string() })?;
            project.add_dependency(dependency);
            self.add_jitpack_repository(project);
        }
        Ok(())
    }

    fn add_jitpack_repository(&self, project: &mut MavenProject) {
        let policy = RepositoryPolicy {
            enabled: true,
            checksum_policy: "fail".to_string(),
            ..Default::default()
        };
        let added = project.add_repository(Repository {
            id: format!("jitpack.io-{}", Uuid::new_v4()),
            url: self.config.jitpack_repository_url.clone(),
            snapshots: policy.clone(),
            releases: policy,
            ..Default::default()
        });
        if added {
            debug!(url = %self.config.jitpack_repository_url, "Registered Jitpack repository");
        }
    }
}

/// `name` unless it already starts with `skip_if`, otherwise `prefix + name`
fn with_prefix(name: &str, skip_if: &str, prefix: &str) -> String {
    if name.starts_with(skip_if) {
        name.to_string()
    } else {
        format!("{prefix}{name}")
    }
}

/// Add the dependencies the catalog declares for every artifact already in
/// the project. Only the artifacts present on entry are expanded.
fn add_dependencies_from_catalog(project: &mut MavenProject, catalog: &RuntimeCatalog) {
    let present: Vec<String> = project
        .dependencies
        .iter()
        .map(|dependency| dependency.artifact_id.clone())
        .collect();

    for artifact_id in &present {
        let Some(artifact) = catalog.artifact(artifact_id) else {
            continue;
        };
        for transitive in &artifact.dependencies {
            project.add_dependency_gav(&transitive.group_id, &transitive.artifact_id, "");
            for exclusion in &transitive.exclusions {
                project.add_dependency_exclusion(
                    &transitive.group_id,
                    &transitive.artifact_id,
                    Exclusion::new(exclusion.group_id.as_str(), exclusion.artifact_id.as_str()),
                );
            }
        }
    }
}

/// Attach the exclusions the catalog declares for artifacts in the project
fn add_catalog_exclusions(project: &mut MavenProject, catalog: &RuntimeCatalog) {
    let present: Vec<String> = project
        .dependencies
        .iter()
        .map(|dependency| dependency.artifact_id.clone())
        .collect();

    for artifact_id in &present {
        let Some(artifact) = catalog.artifact(artifact_id) else {
            continue;
        };
        for exclusion in &artifact.exclusions {
            project.add_dependency_exclusion(
                &artifact.group_id,
                &artifact.artifact_id,
                Exclusion::new(exclusion.group_id.as_str(), exclusion.artifact_id.as_str()),
            );
        }
    }
}

/// [`DependencyManager::manage`] with the default Maven settings
pub fn manage_integration_dependencies<I, S>(
    project: &mut MavenProject,
    dependencies: I,
    catalog: &RuntimeCatalog,
) -> Result<(), DependencyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DependencyManager::default().manage(project, dependencies, catalog)
}

/// Clear the version of Camel, Camel K and Camel Quarkus artifacts so the
/// imported BOM decides it
pub fn sanitize_dependencies(dependencies: &mut [Dependency]) {
    for dependency in dependencies {
        if matches!(
            dependency.group_id.as_str(),
            CAMEL_GROUP | CAMEL_K_GROUP | CAMEL_QUARKUS_GROUP
        ) {
            dependency.version.clear();
        }
    }
}
