//! Catalog version resolution
//!
//! Picks the catalog to build an integration against: an exact version match
//! if one exists, otherwise the highest catalog satisfying every requested
//! version range.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

use camelk_core::application::errors::CatalogError;
use camelk_core::domain::{CamelCatalog, RuntimeProvider};
use camelk_core::infrastructure::RuntimeCatalog;

use crate::domain::{VersionRequirement, parse_version};

/// Versions requested for a build. Quarkus axes only apply to the Quarkus
/// provider and are ignored when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogRequirement {
    pub camel_version: String,
    pub runtime_version: String,
    pub provider: RuntimeProvider,
    pub quarkus_version: Option<String>,
    pub camel_quarkus_version: Option<String>,
}

impl CatalogRequirement {
    pub fn new(
        camel_version: impl Into<String>,
        runtime_version: impl Into<String>,
        provider: RuntimeProvider,
    ) -> Self {
        Self {
            camel_version: camel_version.into(),
            runtime_version: runtime_version.into(),
            provider,
            ..Default::default()
        }
    }

    pub fn with_quarkus(
        mut self,
        quarkus_version: impl Into<String>,
        camel_quarkus_version: impl Into<String>,
    ) -> Self {
        self.quarkus_version = Some(quarkus_version.into());
        self.camel_quarkus_version = Some(camel_quarkus_version.into());
        self
    }
}

/// A catalog whose Camel and runtime versions parse
#[derive(Debug, Clone)]
pub struct CatalogVersion<'a> {
    pub camel: Version,
    pub runtime: Version,
    pub catalog: &'a CamelCatalog,
}

impl<'a> CatalogVersion<'a> {
    fn new(catalog: &'a CamelCatalog) -> Option<Self> {
        let runtime = &catalog.spec.runtime;
        let camel = match parse_version(runtime.camel_version()) {
            Ok(version) => version,
            Err(e) => {
                debug!(catalog = %catalog.metadata.name, error = %e, "Skipping catalog with unparseable Camel version");
                return None;
            }
        };
        let runtime_version = match parse_version(&runtime.version) {
            Ok(version) => version,
            Err(e) => {
                debug!(catalog = %catalog.metadata.name, error = %e, "Skipping catalog with unparseable runtime version");
                return None;
            }
        };
        Some(Self {
            camel,
            runtime: runtime_version,
            catalog,
        })
    }

    /// Whether an optional axis accepts the catalog's metadata value
    fn axis_matches(&self, requirement: Option<&VersionRequirement>, value: &str, axis: &str) -> bool {
        let Some(requirement) = requirement else {
            return true;
        };
        match parse_version(value) {
            Ok(version) => requirement.matches(&version),
            Err(e) => {
                debug!(catalog = %self.catalog.metadata.name, %axis, error = %e, "Catalog version does not parse");
                false
            }
        }
    }
}

struct ParsedRequirement {
    camel: VersionRequirement,
    runtime: VersionRequirement,
    quarkus: Option<VersionRequirement>,
    camel_quarkus: Option<VersionRequirement>,
}

impl ParsedRequirement {
    fn parse(requirement: &CatalogRequirement) -> Option<Self> {
        let parse = |axis: &str, value: &str| match VersionRequirement::parse(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(%axis, %value, error = %e, "Unparseable version constraint");
                None
            }
        };

        let quarkus_axes = requirement.provider == RuntimeProvider::Quarkus;
        let optional = |axis: &str, value: &Option<String>| -> Option<Option<VersionRequirement>> {
            match value {
                Some(value) if quarkus_axes => parse(axis, value).map(Some),
                _ => Some(None),
            }
        };

        Some(Self {
            camel: parse("camel", &requirement.camel_version)?,
            runtime: parse("runtime", &requirement.runtime_version)?,
            quarkus: optional("quarkus", &requirement.quarkus_version)?,
            camel_quarkus: optional("camel-quarkus", &requirement.camel_quarkus_version)?,
        })
    }

    fn accepts(&self, candidate: &CatalogVersion<'_>) -> bool {
        let runtime = &candidate.catalog.spec.runtime;
        self.camel.matches(&candidate.camel)
            && self.runtime.matches(&candidate.runtime)
            && candidate.axis_matches(self.quarkus.as_ref(), runtime.quarkus_version(), "quarkus")
            && candidate.axis_matches(
                self.camel_quarkus.as_ref(),
                runtime.camel_quarkus_version(),
                "camel-quarkus",
            )
    }
}

fn of_provider(
    catalogs: &[CamelCatalog],
    provider: RuntimeProvider,
) -> impl Iterator<Item = &CamelCatalog> {
    catalogs
        .iter()
        .filter(move |catalog| catalog.spec.runtime.provider == provider)
}

/// Select the best catalog for `requirement`, or `None` when nothing fits.
///
/// Only catalogs of the requested provider are considered. A literal match
/// on Camel and runtime version wins outright, even for versions that are
/// not semver. Otherwise candidates are ranked by Camel version, then
/// runtime version, highest first.
pub fn find_best_match<'a>(
    catalogs: &'a [CamelCatalog],
    requirement: &CatalogRequirement,
) -> Option<&'a CamelCatalog> {
    if let Some(exact) = of_provider(catalogs, requirement.provider).find(|catalog| {
        catalog.spec.runtime.camel_version() == requirement.camel_version
            && catalog.spec.runtime.version == requirement.runtime_version
    }) {
        debug!(catalog = %exact.metadata.name, "Exact catalog match");
        return Some(exact);
    }

    let parsed = ParsedRequirement::parse(requirement)?;

    let mut candidates: Vec<CatalogVersion<'a>> = of_provider(catalogs, requirement.provider)
        .filter_map(CatalogVersion::new)
        .collect();
    candidates.sort_by_key(|candidate| Reverse((candidate.camel.clone(), candidate.runtime.clone())));

    candidates
        .into_iter()
        .find(|candidate| parsed.accepts(candidate))
        .map(|candidate| candidate.catalog)
}

/// [`find_best_match`], indexed, with a missing match turned into an error
pub fn resolve_catalog(
    catalogs: &[CamelCatalog],
    requirement: &CatalogRequirement,
) -> Result<RuntimeCatalog, CatalogError> {
    find_best_match(catalogs, requirement)
        .map(|catalog| RuntimeCatalog::new(catalog.spec.clone()))
        .ok_or_else(|| CatalogError::NotFound {
            runtime_version: requirement.runtime_version.clone(),
            provider: requirement.provider,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camelk_core::domain::{CamelCatalogSpec, ObjectMeta, RuntimeSpec};
    use std::collections::BTreeMap;

    fn catalog(name: &str, camel: &str, runtime: &str, provider: RuntimeProvider) -> CamelCatalog {
        let mut metadata = BTreeMap::new();
        metadata.insert("camel.version".to_string(), camel.to_string());
        CamelCatalog {
            metadata: ObjectMeta { name: name.to_string() },
            spec: CamelCatalogSpec {
                runtime: RuntimeSpec {
                    version: runtime.to_string(),
                    provider,
                    metadata,
                    ..Default::default()
                },
                artifacts: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn test_provider_filter() {
        let catalogs = vec![
            catalog("main", "3.20.1", "1.17.0", RuntimeProvider::Main),
            catalog("quarkus", "3.18.0", "1.16.0", RuntimeProvider::Quarkus),
        ];
        let found = find_best_match(&catalogs, &CatalogRequirement::new(">= 3", ">= 1", RuntimeProvider::Quarkus));
        assert_eq!(found.map(|c| c.metadata.name.as_str()), Some("quarkus"));
    }

    #[test]
    fn test_ties_broken_by_runtime_version() {
        let catalogs = vec![
            catalog("a", "3.20.1", "1.17.0", RuntimeProvider::Quarkus),
            catalog("b", "3.20.1", "1.17.2", RuntimeProvider::Quarkus),
        ];
        let found = find_best_match(&catalogs, &CatalogRequirement::new("3.20.x", "1.17.x", RuntimeProvider::Quarkus));
        assert_eq!(found.map(|c| c.metadata.name.as_str()), Some("b"));
    }

    #[test]
    fn test_resolve_catalog_not_found() {
        let catalogs = vec![catalog("a", "3.20.1", "1.17.0", RuntimeProvider::Quarkus)];
        let err = resolve_catalog(&catalogs, &CatalogRequirement::new("4.x", "2.x", RuntimeProvider::Quarkus))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert!(err.to_string().contains("runtime=2.x, provider=quarkus"));
    }
}
