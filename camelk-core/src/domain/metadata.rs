//! Metadata extracted from integration sources
//!
//! A [`Metadata`] record is produced per source by an inspector and folded
//! into an [`IntegrationMetadata`] with [`Metadata::merge`]. The fold starts
//! from [`Metadata::default`], which is the neutral element of the merge:
//! passive, not exposing HTTP, with empty collections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Runtime feature that downstream provisioning must enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Rest,
    CircuitBreaker,
    #[serde(rename = "platform-http")]
    PlatformHttp,
    Tracing,
    Health,
    Cron,
    Master,
}

impl Capability {
    /// Name used as key in the catalog runtime capabilities
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Rest => "rest",
            Capability::CircuitBreaker => "circuit-breaker",
            Capability::PlatformHttp => "platform-http",
            Capability::Tracing => "tracing",
            Capability::Health => "health",
            Capability::Cron => "cron",
            Capability::Master => "master",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoints, dependencies and capabilities discovered in one or more sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Consumer endpoints, in discovery order
    pub from_uris: Vec<String>,
    /// Producer endpoints, in discovery order
    pub to_uris: Vec<String>,
    pub error_handler_uris: Vec<String>,
    /// Symbolic dependency identifiers such as `camel:log`
    pub dependencies: BTreeSet<String>,
    pub required_capabilities: BTreeSet<Capability>,
    pub exposes_http_services: bool,
    /// True when no consumer endpoint needs an always-running process
    pub passive_endpoints: bool,
    pub kamelets: Vec<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            from_uris: Vec::new(),
            to_uris: Vec::new(),
            error_handler_uris: Vec::new(),
            dependencies: BTreeSet::new(),
            required_capabilities: BTreeSet::new(),
            exposes_http_services: false,
            passive_endpoints: true,
            kamelets: Vec::new(),
        }
    }
}

impl Metadata {
    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        self.dependencies.insert(dependency.into());
    }

    pub fn add_required_capability(&mut self, capability: Capability) {
        self.required_capabilities.insert(capability);
    }

    /// Record a consumer URI unless this record already holds it
    pub fn add_from_uri(&mut self, uri: impl Into<String>) {
        push_unique(&mut self.from_uris, uri.into());
    }

    /// Record a producer URI unless this record already holds it
    pub fn add_to_uri(&mut self, uri: impl Into<String>) {
        push_unique(&mut self.to_uris, uri.into());
    }

    pub fn add_error_handler_uri(&mut self, uri: impl Into<String>) {
        push_unique(&mut self.error_handler_uris, uri.into());
    }

    /// Record a Kamelet reference unless this record already holds it
    pub fn add_kamelet(&mut self, kamelet: impl Into<String>) {
        push_unique(&mut self.kamelets, kamelet.into());
    }

    /// Combine two records: lists are concatenated (`self` first), sets are
    /// unioned, HTTP exposure is OR-ed and passivity AND-ed.
    pub fn merge(mut self, other: Metadata) -> Metadata {
        self.merge_from(other);
        self
    }

    /// In-place variant of [`Metadata::merge`]
    pub fn merge_from(&mut self, other: Metadata) {
        self.from_uris.extend(other.from_uris);
        self.to_uris.extend(other.to_uris);
        self.error_handler_uris.extend(other.error_handler_uris);
        self.dependencies.extend(other.dependencies);
        self.required_capabilities
            .extend(other.required_capabilities);
        self.exposes_http_services = self.exposes_http_services || other.exposes_http_services;
        self.passive_endpoints = self.passive_endpoints && other.passive_endpoints;
        self.kamelets.extend(other.kamelets);
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Metadata of a whole integration, merged over its sources in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationMetadata {
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Names of the sources, in merge order
    pub sources: Vec<String>,
}

impl IntegrationMetadata {
    /// Append the metadata of the next source
    pub fn push(&mut self, source_name: impl Into<String>, metadata: Metadata) {
        self.sources.push(source_name.into());
        self.metadata.merge_from(metadata);
    }

    pub fn into_inner(self) -> Metadata {
        self.metadata
    }
}

impl Deref for IntegrationMetadata {
    type Target = Metadata;

    fn deref(&self) -> &Self::Target {
        &self.metadata
    }
}

impl DerefMut for IntegrationMetadata {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.metadata
    }
}
