//! Maven project model mutated by the dependency manager

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::errors::MavenError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

impl Exclusion {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub classifier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<Exclusion>,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }

    /// Coordinates as `group:artifact[:type[:classifier]][:version]`
    pub fn gav(&self) -> String {
        let mut gav = format!("{}:{}", self.group_id, self.artifact_id);
        for part in [&self.kind, &self.classifier, &self.version] {
            if !part.is_empty() {
                gav.push(':');
                gav.push_str(part);
            }
        }
        gav
    }
}

/// Parse `<groupId>:<artifactId>[:<packaging>[:<classifier>]]:<version>`.
///
/// Two segments yield a dependency without version, three a versioned one,
/// four add the packaging and five the classifier.
pub fn parse_gav(gav: &str) -> Result<Dependency, MavenError> {
    let parts: Vec<&str> = gav.split(':').collect();
    if parts.iter().any(|part| part.contains(' ')) || parts.len() < 2 || parts.len() > 5 {
        return Err(MavenError::invalid_gav(gav));
    }
    if parts[0].is_empty() || parts[1].is_empty() {
        return Err(MavenError::invalid_gav(gav));
    }

    let mut dependency = Dependency::new(parts[0], parts[1], "");
    match parts.len() {
        2 => {}
        3 => dependency.version = parts[2].to_string(),
        4 => {
            dependency.kind = parts[2].to_string();
            dependency.version = parts[3].to_string();
        }
        _ => {
            dependency.kind = parts[2].to_string();
            dependency.classifier = parts[3].to_string();
            dependency.version = parts[4].to_string();
        }
    }

    Ok(dependency)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPolicy {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub update_policy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub checksum_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub snapshots: RepositoryPolicy,
    #[serde(default)]
    pub releases: RepositoryPolicy,
}

/// In-memory `pom.xml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenProject {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub properties: BTreeMap<String, String>,
    pub dependency_management: Vec<Dependency>,
    pub dependencies: Vec<Dependency>,
    pub repositories: Vec<Repository>,
}

impl MavenProject {
    pub fn new_with_gav(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            "project.build.sourceEncoding".to_string(),
            "UTF-8".to_string(),
        );

        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            properties,
            ..Default::default()
        }
    }

    /// Add a dependency unless one with the same group and artifact exists
    pub fn add_dependency(&mut self, dependency: Dependency) {
        if self.lookup_dependency(&dependency.group_id, &dependency.artifact_id).is_none() {
            self.dependencies.push(dependency);
        }
    }

    pub fn add_dependency_gav(&mut self, group_id: &str, artifact_id: &str, version: &str) {
        self.add_dependency(Dependency::new(group_id, artifact_id, version));
    }

    pub fn add_encoded_dependency_gav(&mut self, gav: &str) -> Result<(), MavenError> {
        let dependency = parse_gav(gav)?;
        self.add_dependency(dependency);
        Ok(())
    }

    pub fn lookup_dependency(&self, group_id: &str, artifact_id: &str) -> Option<&Dependency> {
        self.dependencies
            .iter()
            .find(|dependency| dependency.matches(group_id, artifact_id))
    }

    pub fn lookup_dependency_mut(
        &mut self,
        group_id: &str,
        artifact_id: &str,
    ) -> Option<&mut Dependency> {
        self.dependencies
            .iter_mut()
            .find(|dependency| dependency.matches(group_id, artifact_id))
    }

    /// Attach an exclusion to an existing dependency, once
    pub fn add_dependency_exclusion(
        &mut self,
        group_id: &str,
        artifact_id: &str,
        exclusion: Exclusion,
    ) {
        if let Some(dependency) = self.lookup_dependency_mut(group_id, artifact_id) {
            if !dependency.exclusions.contains(&exclusion) {
                dependency.exclusions.push(exclusion);
            }
        }
    }

    /// Register a repository unless one with the same URL exists.
    /// Returns whether the repository was added.
    pub fn add_repository(&mut self, repository: Repository) -> bool {
        if self.repositories.iter().any(|r| r.url == repository.url) {
            return false;
        }
        self.repositories.push(repository);
        true
    }
}
