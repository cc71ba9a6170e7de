//! Error types shared across the engine

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::RuntimeProvider;

/// Errors raised while extracting metadata from a single source
#[derive(Error, Debug)]
pub enum InspectError {
    /// Content must be inline and uncompressed before inspection
    #[error("source {name} must be dereferenced and decompressed before inspection")]
    SourceNotResolved { name: String },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("unable to parse step: {step}")]
    InvalidStep { step: String },

    #[error("unknown key type: {key}, step: {step}")]
    UnsupportedStepKey { key: String, step: String },
}

/// Errors raised while loading or selecting a runtime catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "unable to find catalog matching version requirement: runtime={runtime_version}, provider={provider}"
    )]
    NotFound {
        runtime_version: String,
        provider: RuntimeProvider,
    },
}

/// Errors raised by the Maven project model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MavenError {
    #[error(
        "GAV must match <groupId>:<artifactId>[:<packagingType>[:<classifier>]]:(<version>|'?'), got {gav}"
    )]
    InvalidGav { gav: String },
}

impl MavenError {
    pub fn invalid_gav(gav: impl Into<String>) -> Self {
        Self::InvalidGav { gav: gav.into() }
    }
}

/// Errors raised while rendering a `pom.xml`
#[derive(Error, Debug)]
pub enum PomError {
    #[error("Failed to write POM: {0}")]
    Write(#[from] std::io::Error),

    #[error("POM is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
