//! Normalisation and validation of user supplied dependency identifiers

use serde::Serialize;
use std::fmt;
use tracing::warn;

use camelk_core::domain::{CAMEL_GROUP, CAMEL_QUARKUS_GROUP, parse_gav};
use camelk_core::infrastructure::RuntimeCatalog;

/// Rewrite the alternative Camel spellings into `camel:<name>` and
/// `camel-k:<name>`; any other identifier is returned unchanged.
pub fn normalize_dependency(dependency: &str) -> String {
    if let Some(name) = dependency.strip_prefix("camel-quarkus-") {
        format!("camel:{name}")
    } else if let Some(name) = dependency.strip_prefix("camel-quarkus:") {
        format!("camel:{name}")
    } else if let Some(name) = dependency.strip_prefix("camel-k-") {
        format!("camel-k:{name}")
    } else if dependency.starts_with("camel-k:") {
        dependency.to_string()
    } else if let Some(name) = dependency.strip_prefix("camel-") {
        format!("camel:{name}")
    } else {
        dependency.to_string()
    }
}

pub fn normalize_dependencies<I, S>(dependencies: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dependencies
        .into_iter()
        .map(|dependency| normalize_dependency(dependency.as_ref()))
        .collect()
}

/// Something suspicious about a dependency that does not stop a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DependencyWarning {
    /// `camel:<name>` with no matching catalog artifact
    NotInCatalog { dependency: String },
    /// A Maven coordinate spelling out a Camel artifact
    PreferShortForm { dependency: String, suggestion: String },
}

impl fmt::Display for DependencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyWarning::NotInCatalog { dependency } => {
                write!(f, "dependency {dependency} not found in Camel catalog")
            }
            DependencyWarning::PreferShortForm {
                dependency,
                suggestion,
            } => write!(f, "do not use {dependency}. Use {suggestion} instead"),
        }
    }
}

/// Check one identifier against the catalog. The catalog may be
/// incomplete, so this never fails.
pub fn validate_dependency(catalog: &RuntimeCatalog, dependency: &str) -> Option<DependencyWarning> {
    if let Some(artifact) = dependency.strip_prefix("camel:") {
        if catalog.has_artifact(artifact) {
            return None;
        }
        return Some(DependencyWarning::NotInCatalog {
            dependency: dependency.to_string(),
        });
    }

    let gav = parse_gav(dependency.strip_prefix("mvn:")?).ok()?;
    let name = match gav.group_id.as_str() {
        CAMEL_GROUP => gav.artifact_id.strip_prefix("camel-"),
        CAMEL_QUARKUS_GROUP => gav.artifact_id.strip_prefix("camel-quarkus-"),
        _ => None,
    }?;
    Some(DependencyWarning::PreferShortForm {
        dependency: dependency.to_string(),
        suggestion: format!("camel:{name}"),
    })
}

/// Validate every identifier, logging each warning
pub fn validate_dependencies<I, S>(catalog: &RuntimeCatalog, dependencies: I) -> Vec<DependencyWarning>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dependencies
        .into_iter()
        .filter_map(|dependency| validate_dependency(catalog, dependency.as_ref()))
        .inspect(|warning| warn!(%warning, "Dependency check"))
        .collect()
}
