//! `pom.xml` rendering for a [`MavenProject`]

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::application::errors::PomError;
use crate::domain::{Dependency, MavenProject, Repository, RepositoryPolicy};

type PomWriter = Writer<Cursor<Vec<u8>>>;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

impl MavenProject {
    /// Render the project as an indented `pom.xml` document.
    ///
    /// Empty optional fields are omitted; dependencies, managed
    /// dependencies and repositories keep insertion order.
    pub fn to_pom_xml(&self) -> Result<String, PomError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut project = BytesStart::new("project");
        project.push_attribute(("xmlns", POM_NAMESPACE));
        project.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
        project.push_attribute(("xsi:schemaLocation", POM_SCHEMA_LOCATION));
        writer.write_event(Event::Start(project))?;

        write_simple(&mut writer, "modelVersion", "4.0.0")?;
        write_simple(&mut writer, "groupId", &self.group_id)?;
        write_simple(&mut writer, "artifactId", &self.artifact_id)?;
        write_simple(&mut writer, "version", &self.version)?;

        if !self.properties.is_empty() {
            start(&mut writer, "properties")?;
            for (key, value) in &self.properties {
                write_simple(&mut writer, key, value)?;
            }
            end(&mut writer, "properties")?;
        }

        if !self.dependency_management.is_empty() {
            start(&mut writer, "dependencyManagement")?;
            write_dependencies(&mut writer, &self.dependency_management)?;
            end(&mut writer, "dependencyManagement")?;
        }

        if !self.dependencies.is_empty() {
            write_dependencies(&mut writer, &self.dependencies)?;
        }

        if !self.repositories.is_empty() {
            start(&mut writer, "repositories")?;
            for repository in &self.repositories {
                write_repository(&mut writer, repository)?;
            }
            end(&mut writer, "repositories")?;
        }

        end(&mut writer, "project")?;

        let mut xml = String::from_utf8(writer.into_inner().into_inner())?;
        if !xml.ends_with('\n') {
            xml.push('\n');
        }
        Ok(xml)
    }
}

fn start(writer: &mut PomWriter, name: &str) -> Result<(), PomError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end(writer: &mut PomWriter, name: &str) -> Result<(), PomError> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_simple(writer: &mut PomWriter, name: &str, value: &str) -> Result<(), PomError> {
    start(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    end(writer, name)
}

fn write_optional(writer: &mut PomWriter, name: &str, value: &str) -> Result<(), PomError> {
    if value.is_empty() {
        return Ok(());
    }
    write_simple(writer, name, value)
}

fn write_dependencies(writer: &mut PomWriter, dependencies: &[Dependency]) -> Result<(), PomError> {
    start(writer, "dependencies")?;
    for dependency in dependencies {
        start(writer, "dependency")?;
        write_simple(writer, "groupId", &dependency.group_id)?;
        write_simple(writer, "artifactId", &dependency.artifact_id)?;
        write_optional(writer, "version", &dependency.version)?;
        write_optional(writer, "type", &dependency.kind)?;
        write_optional(writer, "classifier", &dependency.classifier)?;
        write_optional(writer, "scope", &dependency.scope)?;

        if !dependency.exclusions.is_empty() {
            start(writer, "exclusions")?;
            for exclusion in &dependency.exclusions {
                start(writer, "exclusion")?;
                write_simple(writer, "groupId", &exclusion.group_id)?;
                write_simple(writer, "artifactId", &exclusion.artifact_id)?;
                end(writer, "exclusion")?;
            }
            end(writer, "exclusions")?;
        }
        end(writer, "dependency")?;
    }
    end(writer, "dependencies")
}

fn write_repository(writer: &mut PomWriter, repository: &Repository) -> Result<(), PomError> {
    start(writer, "repository")?;
    write_simple(writer, "id", &repository.id)?;
    write_optional(writer, "name", &repository.name)?;
    write_simple(writer, "url", &repository.url)?;
    write_policy(writer, "snapshots", &repository.snapshots)?;
    write_policy(writer, "releases", &repository.releases)?;
    end(writer, "repository")
}

fn write_policy(writer: &mut PomWriter, name: &str, policy: &RepositoryPolicy) -> Result<(), PomError> {
    start(writer, name)?;
    write_simple(writer, "enabled", if policy.enabled { "true" } else { "false" })?;
    write_optional(writer, "updatePolicy", &policy.update_policy)?;
    write_optional(writer, "checksumPolicy", &policy.checksum_policy)?;
    end(writer, name)
}
