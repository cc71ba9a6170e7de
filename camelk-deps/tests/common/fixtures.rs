//! Test data fixtures for camelk-deps

#![allow(dead_code)]

use camelk_core::domain::{CamelCatalog, RuntimeProvider};
use camelk_core::infrastructure::{RuntimeCatalog, load_default_catalog, parse_catalog};

pub fn default_catalog() -> RuntimeCatalog {
    load_default_catalog().expect("embedded catalog parses")
}

/// Minimal catalog resource with the given versions
pub fn catalog(
    name: &str,
    camel_version: &str,
    runtime_version: &str,
    provider: RuntimeProvider,
    quarkus_version: &str,
) -> CamelCatalog {
    let document = format!(
        r#"
metadata:
  name: {name}
spec:
  runtime:
    version: "{runtime_version}"
    provider: {provider}
    metadata:
      camel.version: "{camel_version}"
      quarkus.version: "{quarkus_version}"
      camel-quarkus.version: "{quarkus_version}"
  artifacts:
    camel-quarkus-log:
      groupId: org.apache.camel.quarkus
      artifactId: camel-quarkus-log
      schemes:
        - id: log
"#
    );
    parse_catalog(&document).expect("fixture catalog parses")
}

/// Catalogs published over a few releases, in no particular order
pub fn published_catalogs() -> Vec<CamelCatalog> {
    vec![
        catalog("camel-catalog-1.12.0", "3.14.1", "1.12.0", RuntimeProvider::Quarkus, "2.7.0.Final"),
        catalog("camel-catalog-1.17.0", "3.20.1", "1.17.0", RuntimeProvider::Quarkus, "2.16.0.Final"),
        catalog("camel-catalog-1.15.0", "3.18.1", "1.15.0", RuntimeProvider::Quarkus, "2.13.0.Final"),
        catalog("camel-catalog-1.16.0", "3.19.0", "1.16.0", RuntimeProvider::Quarkus, "2.14.0.Final"),
        catalog("camel-catalog-1.17.1-main", "3.20.1", "1.17.1", RuntimeProvider::Main, ""),
        catalog("camel-catalog-beta", "3.21.0", "1.0.1.beta-0001", RuntimeProvider::Quarkus, "3.0.0.Alpha1"),
    ]
}
