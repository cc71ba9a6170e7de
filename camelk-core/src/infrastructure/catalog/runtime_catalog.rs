//! Indexed, read-only view over a catalog spec

use std::collections::HashMap;
use tracing::debug;

use crate::domain::{
    CAMEL_QUARKUS_GROUP, CamelArtifact, CamelCatalogSpec, CamelScheme, Capability,
    RuntimeProvider, RuntimeSpec,
};

/// Artifact whose languages and java types are always on the classpath
const BASE_ARTIFACT_ID: &str = "camel-base";

/// Catalog spec plus the lookup indices derived from it.
///
/// All indices are built in [`RuntimeCatalog::new`]; the value is immutable
/// afterwards and can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RuntimeCatalog {
    spec: CamelCatalogSpec,
    artifact_by_scheme: HashMap<String, String>,
    schemes_by_id: HashMap<String, CamelScheme>,
    artifact_by_data_format: HashMap<String, String>,
    language_dependencies: HashMap<String, String>,
    java_type_dependencies: HashMap<String, String>,
}

impl RuntimeCatalog {
    /// Index the artifact table in a single pass.
    ///
    /// Artifacts are visited in id order. When two artifacts declare the same
    /// scheme the later one only wins if it belongs to the Camel Quarkus group.
    pub fn new(spec: CamelCatalogSpec) -> Self {
        let mut artifact_by_scheme = HashMap::new();
        let mut schemes_by_id = HashMap::new();
        let mut artifact_by_data_format = HashMap::new();
        let mut language_dependencies = HashMap::new();
        let mut java_type_dependencies = HashMap::new();

        let provider = spec.runtime.provider;

        for (id, artifact) in &spec.artifacts {
            for scheme in &artifact.schemes {
                if artifact_by_scheme.contains_key(&scheme.id)
                    && artifact.group_id != CAMEL_QUARKUS_GROUP
                {
                    debug!(scheme = %scheme.id, artifact = %id, "Ignoring duplicate scheme");
                    continue;
                }
                artifact_by_scheme.insert(scheme.id.clone(), id.clone());
                schemes_by_id.insert(scheme.id.clone(), scheme.clone());
            }

            for data_format in &artifact.data_formats {
                artifact_by_data_format.insert(data_format.clone(), id.clone());
            }

            if artifact.artifact_id == BASE_ARTIFACT_ID {
                continue;
            }

            for language in &artifact.languages {
                language_dependencies.insert(language.clone(), provider_dependency(artifact, provider));
            }
            for java_type in &artifact.java_types {
                java_type_dependencies.insert(java_type.clone(), provider_dependency(artifact, provider));
            }
        }

        debug!(
            artifacts = spec.artifacts.len(),
            schemes = schemes_by_id.len(),
            runtime_version = %spec.runtime.version,
            "Indexed runtime catalog"
        );

        Self {
            spec,
            artifact_by_scheme,
            schemes_by_id,
            artifact_by_data_format,
            language_dependencies,
            java_type_dependencies,
        }
    }

    pub fn spec(&self) -> &CamelCatalogSpec {
        &self.spec
    }

    pub fn runtime(&self) -> &RuntimeSpec {
        &self.spec.runtime
    }

    pub fn runtime_version(&self) -> &str {
        &self.spec.runtime.version
    }

    pub fn runtime_provider(&self) -> RuntimeProvider {
        self.spec.runtime.provider
    }

    pub fn artifact(&self, id: &str) -> Option<&CamelArtifact> {
        self.spec.artifacts.get(id)
    }

    /// Whether the catalog knows the artifact behind a `camel:<name>` short name
    pub fn has_artifact(&self, name: &str) -> bool {
        if name.starts_with("camel-") {
            return self.spec.artifacts.contains_key(name);
        }
        let id = match self.runtime_provider() {
            RuntimeProvider::Quarkus => format!("camel-quarkus-{name}"),
            RuntimeProvider::Main => format!("camel-{name}"),
        };
        self.spec.artifacts.contains_key(&id)
    }

    pub fn artifact_by_scheme(&self, scheme: &str) -> Option<&CamelArtifact> {
        self.artifact_by_scheme
            .get(scheme)
            .and_then(|id| self.spec.artifacts.get(id))
    }

    pub fn scheme(&self, id: &str) -> Option<&CamelScheme> {
        self.schemes_by_id.get(id)
    }

    pub fn artifact_by_data_format(&self, data_format: &str) -> Option<&CamelArtifact> {
        self.artifact_by_data_format
            .get(data_format)
            .and_then(|id| self.spec.artifacts.get(id))
    }

    pub fn language_dependency(&self, language: &str) -> Option<&str> {
        self.language_dependencies.get(language).map(String::as_str)
    }

    pub fn java_type_dependency(&self, java_type: &str) -> Option<&str> {
        self.java_type_dependencies.get(java_type).map(String::as_str)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.spec.runtime.capabilities.contains_key(capability.as_str())
    }

    /// Dependency ids the runtime declares for a capability
    pub fn capability_dependencies(&self, capability: Capability) -> Vec<String> {
        self.spec
            .runtime
            .capabilities
            .get(capability.as_str())
            .map(|c| c.dependencies.iter().map(|d| d.dependency_id()).collect())
            .unwrap_or_default()
    }

    /// Visit every indexed scheme until the visitor returns `false`
    pub fn visit_schemes<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &CamelScheme) -> bool,
    {
        for (id, scheme) in &self.schemes_by_id {
            if !visitor(id, scheme) {
                break;
            }
        }
    }

    /// Resolve the component behind a URI from its `scheme:` prefix.
    ///
    /// Both halves are `None` when the URI has no `:` delimiter.
    pub fn decode_component(&self, uri: &str) -> (Option<&CamelArtifact>, Option<&CamelScheme>) {
        match uri.split_once(':') {
            Some((prefix, _)) => (self.artifact_by_scheme(prefix), self.scheme(prefix)),
            None => (None, None),
        }
    }
}

/// Dependency id used in the language and java type indices
fn provider_dependency(artifact: &CamelArtifact, provider: RuntimeProvider) -> String {
    let prefix = match provider {
        RuntimeProvider::Quarkus => "camel-quarkus-",
        RuntimeProvider::Main => "camel-",
    };
    match artifact.artifact_id.strip_prefix(prefix) {
        Some(name) => format!("camel:{name}"),
        None => artifact.dependency_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CAMEL_GROUP, RuntimeCapability, MavenArtifact};

    fn artifact(group: &str, id: &str, schemes: &[(&str, bool, bool)]) -> CamelArtifact {
        CamelArtifact {
            group_id: group.to_string(),
            artifact_id: id.to_string(),
            schemes: schemes
                .iter()
                .map(|(scheme, http, passive)| CamelScheme {
                    id: scheme.to_string(),
                    http: *http,
                    passive: *passive,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn catalog(provider: RuntimeProvider, artifacts: Vec<CamelArtifact>) -> RuntimeCatalog {
        let mut spec = CamelCatalogSpec::default();
        spec.runtime.version = "1.17.0".to_string();
        spec.runtime.provider = provider;
        for a in artifacts {
            spec.artifacts.insert(a.artifact_id.clone(), a);
        }
        RuntimeCatalog::new(spec)
    }

    #[test]
    fn test_duplicate_scheme_prefers_quarkus_group() {
        let catalog = catalog(
            RuntimeProvider::Quarkus,
            vec![
                artifact(CAMEL_GROUP, "camel-a-http", &[("http", false, false)]),
                artifact(CAMEL_QUARKUS_GROUP, "camel-quarkus-http", &[("http", true, false)]),
            ],
        );

        let owner = catalog.artifact_by_scheme("http").unwrap();
        assert_eq!(owner.artifact_id, "camel-quarkus-http");
        assert!(catalog.scheme("http").unwrap().http);
    }

    #[test]
    fn test_duplicate_scheme_keeps_first_otherwise() {
        let catalog = catalog(
            RuntimeProvider::Main,
            vec![
                artifact(CAMEL_GROUP, "camel-a-timer", &[("timer", false, false)]),
                artifact(CAMEL_GROUP, "camel-b-timer", &[("timer", false, true)]),
            ],
        );

        assert_eq!(
            catalog.artifact_by_scheme("timer").unwrap().artifact_id,
            "camel-a-timer"
        );
        assert!(!catalog.scheme("timer").unwrap().passive);
    }

    #[test]
    fn test_base_languages_are_not_indexed() {
        let mut base = artifact(CAMEL_GROUP, "camel-base", &[]);
        base.languages = vec!["simple".to_string()];
        base.java_types = vec!["org.apache.camel.language.simple.SimpleLanguage".to_string()];
        let mut groovy = artifact(CAMEL_GROUP, "camel-groovy", &[]);
        groovy.languages = vec!["groovy".to_string()];

        let catalog = catalog(RuntimeProvider::Main, vec![base, groovy]);
        assert_eq!(catalog.language_dependency("simple"), None);
        assert_eq!(
            catalog.java_type_dependency("org.apache.camel.language.simple.SimpleLanguage"),
            None
        );
        assert_eq!(catalog.language_dependency("groovy"), Some("camel:groovy"));
    }

    #[test]
    fn test_language_dependency_follows_provider() {
        let mut jsonpath = artifact(CAMEL_QUARKUS_GROUP, "camel-quarkus-jsonpath", &[]);
        jsonpath.languages = vec!["jsonpath".to_string()];

        let catalog = catalog(RuntimeProvider::Quarkus, vec![jsonpath]);
        assert_eq!(catalog.language_dependency("jsonpath"), Some("camel:jsonpath"));
    }

    #[test]
    fn test_decode_component() {
        let catalog = catalog(
            RuntimeProvider::Quarkus,
            vec![artifact(CAMEL_QUARKUS_GROUP, "camel-quarkus-timer", &[("timer", false, false)])],
        );

        let (artifact, scheme) = catalog.decode_component("timer:tick?period=1s");
        assert_eq!(artifact.unwrap().artifact_id, "camel-quarkus-timer");
        assert_eq!(scheme.unwrap().id, "timer");

        let (artifact, scheme) = catalog.decode_component("unknown:foo");
        assert!(artifact.is_none() && scheme.is_none());

        let (artifact, scheme) = catalog.decode_component("{{url}}");
        assert!(artifact.is_none() && scheme.is_none());
    }

    #[test]
    fn test_capabilities() {
        let mut spec = CamelCatalogSpec::default();
        spec.runtime.capabilities.insert(
            "rest".to_string(),
            RuntimeCapability {
                dependencies: vec![
                    MavenArtifact::new(CAMEL_QUARKUS_GROUP, "camel-quarkus-rest"),
                    MavenArtifact::new(CAMEL_QUARKUS_GROUP, "camel-quarkus-platform-http"),
                ],
            },
        );
        let catalog = RuntimeCatalog::new(spec);

        assert!(catalog.has_capability(Capability::Rest));
        assert!(!catalog.has_capability(Capability::Tracing));
        assert_eq!(
            catalog.capability_dependencies(Capability::Rest),
            vec!["camel:rest", "camel:platform-http"]
        );
        assert!(catalog.capability_dependencies(Capability::Master).is_empty());
    }

    #[test]
    fn test_has_artifact_short_names() {
        let catalog = catalog(
            RuntimeProvider::Quarkus,
            vec![artifact(CAMEL_QUARKUS_GROUP, "camel-quarkus-telegram", &[])],
        );
        assert!(catalog.has_artifact("telegram"));
        assert!(catalog.has_artifact("camel-quarkus-telegram"));
        assert!(!catalog.has_artifact("dropbox"));
    }

    #[test]
    fn test_visit_schemes_stops_early() {
        let catalog = catalog(
            RuntimeProvider::Main,
            vec![artifact(
                CAMEL_GROUP,
                "camel-multi",
                &[("a", false, false), ("b", false, false), ("c", false, false)],
            )],
        );
        let mut visited = 0;
        catalog.visit_schemes(|_, _| {
            visited += 1;
            visited < 2
        });
        assert_eq!(visited, 2);
    }
}
