//! Declarative runtime catalog model
//!
//! Mirrors the `CamelCatalog` resource: a runtime description plus a table of
//! artifacts keyed by id, each listing the schemes, data formats, languages
//! and java types it provides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const CAMEL_GROUP: &str = "org.apache.camel";
pub const CAMEL_K_GROUP: &str = "org.apache.camel.k";
pub const CAMEL_QUARKUS_GROUP: &str = "org.apache.camel.quarkus";

pub const METADATA_CAMEL_VERSION: &str = "camel.version";
pub const METADATA_QUARKUS_VERSION: &str = "quarkus.version";
pub const METADATA_CAMEL_QUARKUS_VERSION: &str = "camel-quarkus.version";

/// Symbolic dependency id for a Maven coordinate.
///
/// Camel, Camel Quarkus and Camel K artifacts map to their short forms
/// (`camel:<name>`, `camel-k:<name>`); anything else is `mvn:g:a[:v]`.
pub fn dependency_id(group_id: &str, artifact_id: &str, version: &str) -> String {
    let short = match group_id {
        CAMEL_GROUP => artifact_id
            .strip_prefix("camel-")
            .map(|name| format!("camel:{name}")),
        CAMEL_QUARKUS_GROUP => artifact_id
            .strip_prefix("camel-quarkus-")
            .map(|name| format!("camel:{name}")),
        CAMEL_K_GROUP => artifact_id
            .strip_prefix("camel-k-")
            .map(|name| format!("camel-k:{name}")),
        _ => None,
    };

    short.unwrap_or_else(|| {
        if version.is_empty() {
            format!("mvn:{group_id}:{artifact_id}")
        } else {
            format!("mvn:{group_id}:{artifact_id}:{version}")
        }
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub classifier: String,
}

impl MavenArtifact {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            ..Default::default()
        }
    }

    pub fn dependency_id(&self) -> String {
        dependency_id(&self.group_id, &self.artifact_id, &self.version)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CamelArtifactExclusion {
    pub group_id: String,
    pub artifact_id: String,
}

/// Transitive dependency declared by an artifact or a scheme scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CamelArtifactDependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<CamelArtifactExclusion>,
}

impl CamelArtifactDependency {
    pub fn dependency_id(&self) -> String {
        dependency_id(&self.group_id, &self.artifact_id, &self.version)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamelSchemeScope {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<CamelArtifactDependency>,
}

/// A component URI scheme such as `timer` or `platform-http`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamelScheme {
    pub id: String,
    #[serde(default)]
    pub passive: bool,
    #[serde(default)]
    pub http: bool,
    #[serde(default)]
    pub consumer: CamelSchemeScope,
    #[serde(default)]
    pub producer: CamelSchemeScope,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CamelArtifact {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<CamelArtifactExclusion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<CamelScheme>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, rename = "dataformats", skip_serializing_if = "Vec::is_empty")]
    pub data_formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<CamelArtifactDependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub java_types: Vec<String>,
}

impl CamelArtifact {
    pub fn dependency_id(&self) -> String {
        dependency_id(&self.group_id, &self.artifact_id, &self.version)
    }

    pub fn scheme(&self, id: &str) -> Option<&CamelScheme> {
        self.schemes.iter().find(|scheme| scheme.id == id)
    }

    /// Dependency ids a consumer endpoint of the given scheme needs
    pub fn consumer_dependency_ids(&self, scheme_id: &str) -> Vec<String> {
        self.scheme(scheme_id)
            .map(|scheme| {
                scheme
                    .consumer
                    .dependencies
                    .iter()
                    .map(CamelArtifactDependency::dependency_id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dependency ids a producer endpoint of the given scheme needs
    pub fn producer_dependency_ids(&self, scheme_id: &str) -> Vec<String> {
        self.scheme(scheme_id)
            .map(|scheme| {
                scheme
                    .producer
                    .dependencies
                    .iter()
                    .map(CamelArtifactDependency::dependency_id)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeProvider {
    #[default]
    Quarkus,
    Main,
}

impl fmt::Display for RuntimeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeProvider::Quarkus => f.write_str("quarkus"),
            RuntimeProvider::Main => f.write_str("main"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeCapability {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<MavenArtifact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSpec {
    pub version: String,
    #[serde(default)]
    pub provider: RuntimeProvider,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub application_class: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<MavenArtifact>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capabilities: BTreeMap<String, RuntimeCapability>,
}

impl RuntimeSpec {
    fn metadata_value(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn camel_version(&self) -> &str {
        self.metadata_value(METADATA_CAMEL_VERSION)
    }

    pub fn quarkus_version(&self) -> &str {
        self.metadata_value(METADATA_QUARKUS_VERSION)
    }

    pub fn camel_quarkus_version(&self) -> &str {
        self.metadata_value(METADATA_CAMEL_QUARKUS_VERSION)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamelCatalogSpec {
    pub runtime: RuntimeSpec,
    #[serde(default)]
    pub artifacts: BTreeMap<String, CamelArtifact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
}

/// Catalog resource as stored in the cluster or embedded in the binary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamelCatalog {
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: CamelCatalogSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_id_short_forms() {
        assert_eq!(dependency_id(CAMEL_GROUP, "camel-log", "3.20.1"), "camel:log");
        assert_eq!(
            dependency_id(CAMEL_QUARKUS_GROUP, "camel-quarkus-timer", ""),
            "camel:timer"
        );
        assert_eq!(
            dependency_id(CAMEL_K_GROUP, "camel-k-knative", ""),
            "camel-k:knative"
        );
    }

    #[test]
    fn test_dependency_id_maven_form() {
        assert_eq!(
            dependency_id("com.acme", "widgets", ""),
            "mvn:com.acme:widgets"
        );
        assert_eq!(
            dependency_id("com.acme", "widgets", "1.2"),
            "mvn:com.acme:widgets:1.2"
        );
        assert_eq!(
            dependency_id(CAMEL_QUARKUS_GROUP, "quarkus-core", ""),
            "mvn:org.apache.camel.quarkus:quarkus-core"
        );
    }

    #[test]
    fn test_scheme_scope_dependencies() {
        let artifact = CamelArtifact {
            group_id: CAMEL_QUARKUS_GROUP.to_string(),
            artifact_id: "camel-quarkus-knative".to_string(),
            schemes: vec![CamelScheme {
                id: "knative".to_string(),
                consumer: CamelSchemeScope {
                    dependencies: vec![CamelArtifactDependency {
                        group_id: CAMEL_K_GROUP.to_string(),
                        artifact_id: "camel-k-knative-consumer".to_string(),
                        ..Default::default()
                    }],
                },
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(
            artifact.consumer_dependency_ids("knative"),
            vec!["camel-k:knative-consumer"]
        );
        assert!(artifact.producer_dependency_ids("knative").is_empty());
        assert!(artifact.consumer_dependency_ids("timer").is_empty());
    }

    #[test]
    fn test_runtime_metadata_accessors() {
        let runtime: RuntimeSpec = serde_yaml::from_str(
            r#"
version: 1.17.0
provider: quarkus
metadata:
  camel.version: 3.20.1
  quarkus.version: 2.16.0.Final
"#,
        )
        .unwrap();

        assert_eq!(runtime.camel_version(), "3.20.1");
        assert_eq!(runtime.quarkus_version(), "2.16.0.Final");
        assert_eq!(runtime.camel_quarkus_version(), "");
        assert_eq!(runtime.provider, RuntimeProvider::Quarkus);
    }
}
