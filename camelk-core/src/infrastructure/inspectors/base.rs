//! Discovery steps shared by every inspector
//!
//! Each inspector collects endpoints its own way and then hands the metadata
//! to [`BaseInspector::finish`], which derives capabilities, dependencies,
//! Kamelets and the HTTP/passive flags from the collected URIs and from
//! content-wide patterns.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use crate::application::errors::InspectError;
use crate::domain::{CamelScheme, Capability, Metadata, SourceSpec};
use crate::infrastructure::catalog::RuntimeCatalog;
use crate::infrastructure::inspectors::kamelet::add_kamelet;

/// Data format used when a `json` step names no library
pub const DEFAULT_JSON_DATA_FORMAT: &str = "jackson";

/// Dependency added for `circuitBreaker`/`hystrix` steps in structured DSLs
pub const HYSTRIX_DEPENDENCY: &str = "camel:hystrix";

/// The one consumer URI ignored when deciding passivity
const KAMELET_SOURCE: &str = "kamelet:source";

/// What a content-wide pattern contributes when it matches
#[derive(Debug, Clone, Copy)]
enum Contribution {
    DataFormat(&'static str),
    CapabilityDependencies(Capability),
    Language(&'static str),
}

static CAPABILITY_PATTERNS: Lazy<Vec<(Regex, Capability)>> = Lazy::new(|| {
    vec![(
        Regex::new(r"\.circuitBreaker\(\)").expect("valid regex"),
        Capability::CircuitBreaker,
    )]
});

static DEPENDENCY_PATTERNS: Lazy<Vec<(Regex, Contribution)>> = Lazy::new(|| {
    let rest = Contribution::CapabilityDependencies(Capability::Rest);
    [
        (r"JsonLibrary\.Jackson", Contribution::DataFormat(DEFAULT_JSON_DATA_FORMAT)),
        (r"\.json\(\)", Contribution::DataFormat(DEFAULT_JSON_DATA_FORMAT)),
        (r"restConfiguration\(\)", rest),
        (r"rest\s*\([^)]*\)", rest),
        (r"rest\s*\{", rest),
        (r"\.groovy\s*\(.*\)", Contribution::Language("groovy")),
        (r"\.?(?:jsonpath|jsonpathWriteAsString)\s*\(.*\)", Contribution::Language("jsonpath")),
        (r"\.ognl\s*\(.*\)", Contribution::Language("ognl")),
        (r"\.mvel\s*\(.*\)", Contribution::Language("mvel")),
        (r"\.xquery\s*\(.*\)", Contribution::Language("xquery")),
        (r"\.?xpath\s*\(.*\)", Contribution::Language("xpath")),
        (r"\.xtokenize\s*\(.*\)", Contribution::Language("xtokenize")),
    ]
    .into_iter()
    .map(|(pattern, contribution)| (Regex::new(pattern).expect("valid regex"), contribution))
    .collect()
});

static LANGUAGE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"language\s*\(\s*["|']([a-zA-Z0-9-]+[^"|']+)["|']\s*,.*\)"#).expect("valid regex")
});

static CAMEL_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(org\.apache\.camel\.[\w.]*(?:Component|DataFormat|Language))\b")
        .expect("valid regex")
});

static REST_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"rest\s*\([^)]*\)").expect("valid regex"));
static REST_CLOSURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"rest\s*\{").expect("valid regex"));

/// Whether lexical content declares a REST service
pub fn has_rest_indicator(content: &str) -> bool {
    REST_CALL.is_match(content) || REST_CLOSURE.is_match(content)
}

/// Fail unless the source content is inline and uncompressed
pub fn ensure_resolved(source: &SourceSpec) -> Result<(), InspectError> {
    if source.is_resolved() {
        Ok(())
    } else {
        Err(InspectError::SourceNotResolved {
            name: source.name.clone(),
        })
    }
}

/// Scheme prefix of a URI, the whole URI when it has no `:`
pub fn uri_scheme(uri: &str) -> &str {
    uri.split_once(':').map_or(uri, |(scheme, _)| scheme)
}

/// Catalog-bound discovery shared by all inspectors
#[derive(Debug, Clone)]
pub struct BaseInspector {
    catalog: Arc<RuntimeCatalog>,
}

impl BaseInspector {
    pub fn new(catalog: Arc<RuntimeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuntimeCatalog {
        &self.catalog
    }

    /// Complete extraction once endpoints have been collected.
    ///
    /// `has_rest` marks a REST declaration found by the caller; the flags are
    /// OR-ed with whatever the caller already set on `meta`.
    pub fn finish(&self, content: &str, meta: &mut Metadata, has_rest: bool) {
        self.discover_capabilities(content, meta);
        self.discover_dependencies(content, meta);
        self.discover_kamelets(meta);

        if has_rest {
            meta.add_required_capability(Capability::Rest);
        }
        self.add_capability_dependencies(meta);

        meta.exposes_http_services =
            meta.exposes_http_services || has_rest || self.contains_http_uris(&meta.from_uris);
        meta.passive_endpoints = self.has_only_passive_endpoints(&meta.from_uris);
    }

    fn discover_capabilities(&self, content: &str, meta: &mut Metadata) {
        let uses_platform_http = meta
            .from_uris
            .iter()
            .chain(&meta.to_uris)
            .any(|uri| uri_scheme(uri) == "platform-http");
        if uses_platform_http {
            meta.add_required_capability(Capability::PlatformHttp);
        }

        for (pattern, capability) in CAPABILITY_PATTERNS.iter() {
            if pattern.is_match(content) {
                meta.add_required_capability(*capability);
            }
        }
    }

    fn discover_dependencies(&self, content: &str, meta: &mut Metadata) {
        let from_uris = meta.from_uris.clone();
        for uri in &from_uris {
            self.add_uri_dependencies(uri, meta, true);
        }
        let to_uris = meta.to_uris.clone();
        for uri in &to_uris {
            self.add_uri_dependencies(uri, meta, false);
        }

        for (pattern, contribution) in DEPENDENCY_PATTERNS.iter() {
            if !pattern.is_match(content) {
                continue;
            }
            match contribution {
                Contribution::DataFormat(name) => self.add_data_format_dependency(name, meta),
                Contribution::CapabilityDependencies(capability) => {
                    for dependency in self.catalog.capability_dependencies(*capability) {
                        meta.add_dependency(dependency);
                    }
                }
                Contribution::Language(language) => self.add_language_dependency(language, meta),
            }
        }

        for captures in LANGUAGE_CALL.captures_iter(content) {
            if let Some(language) = captures.get(1) {
                self.add_language_dependency(language.as_str(), meta);
            }
        }

        for captures in CAMEL_TYPE.captures_iter(content) {
            if let Some(java_type) = captures.get(1) {
                if let Some(dependency) = self.catalog.java_type_dependency(java_type.as_str()) {
                    meta.add_dependency(dependency);
                }
            }
        }
    }

    fn discover_kamelets(&self, meta: &mut Metadata) {
        let uris: Vec<String> = meta.from_uris.iter().chain(&meta.to_uris).cloned().collect();
        for uri in &uris {
            add_kamelet(meta, uri);
        }
    }

    fn add_capability_dependencies(&self, meta: &mut Metadata) {
        let capabilities: Vec<Capability> = meta.required_capabilities.iter().copied().collect();
        for capability in capabilities {
            for dependency in self.catalog.capability_dependencies(capability) {
                meta.add_dependency(dependency);
            }
        }
    }

    /// Dependencies of the component behind `uri`.
    ///
    /// Unknown schemes, including unresolved property placeholders, are
    /// skipped: endpoint discovery is best effort.
    pub fn add_uri_dependencies(&self, uri: &str, meta: &mut Metadata, consumer: bool) {
        let (Some(artifact), Some(scheme)) = self.catalog.decode_component(uri) else {
            debug!(%uri, "No catalog component for endpoint");
            return;
        };

        meta.add_dependency(artifact.dependency_id());
        let scoped = if consumer {
            artifact.consumer_dependency_ids(&scheme.id)
        } else {
            artifact.producer_dependency_ids(&scheme.id)
        };
        for dependency in scoped {
            meta.add_dependency(dependency);
        }

        self.add_dependencies_from_uri(uri, scheme, meta);
    }

    /// `dataformat:<name>:<operation>` also needs the named data format
    fn add_dependencies_from_uri(&self, uri: &str, scheme: &CamelScheme, meta: &mut Metadata) {
        if scheme.id != "dataformat" {
            return;
        }
        let parts: Vec<&str> = uri.split(':').collect();
        if parts.len() < 3 {
            debug!(%uri, "Incomplete dataformat endpoint");
            return;
        }
        self.add_data_format_dependency(parts[1], meta);
    }

    pub fn add_data_format_dependency(&self, data_format: &str, meta: &mut Metadata) {
        match self.catalog.artifact_by_data_format(data_format) {
            Some(artifact) => meta.add_dependency(artifact.dependency_id()),
            None => debug!(%data_format, "Data format not found in catalog"),
        }
    }

    pub fn add_language_dependency(&self, language: &str, meta: &mut Metadata) {
        if let Some(dependency) = self.catalog.language_dependency(language) {
            meta.add_dependency(dependency);
        }
    }

    fn contains_http_uris(&self, uris: &[String]) -> bool {
        uris.iter().any(|uri| {
            self.catalog
                .scheme(uri_scheme(uri))
                .is_some_and(|scheme| scheme.http)
        })
    }

    /// True when no consumer endpoint needs to stay active
    fn has_only_passive_endpoints(&self, uris: &[String]) -> bool {
        uris.iter()
            .filter(|uri| uri.as_str() != KAMELET_SOURCE)
            .all(|uri| {
                self.catalog
                    .scheme(uri_scheme(uri))
                    .is_some_and(|scheme| scheme.http || scheme.passive)
            })
    }
}
