//! Inspectors for the YAML DSLs
//!
//! [`YamlInspector`] walks the structural DSL and rejects malformed steps.
//! [`YamlFlowInspector`] reads the legacy flow dialect and treats content it
//! cannot decode as a source without endpoints.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::application::errors::InspectError;
use crate::domain::{Capability, Language, Metadata, SourceSpec};
use crate::infrastructure::catalog::RuntimeCatalog;
use crate::infrastructure::inspectors::base::{
    BaseInspector, DEFAULT_JSON_DATA_FORMAT, HYSTRIX_DEPENDENCY, ensure_resolved,
};
use crate::infrastructure::inspectors::kamelet::add_kamelet;
use crate::infrastructure::inspectors::traits::SourceInspector;

/// Append `parameters` to a URI as a sorted, form-encoded query string
pub fn append_parameters(uri: &str, parameters: &BTreeMap<String, String>) -> String {
    if parameters.is_empty() {
        return uri.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(parameters)
        .finish();
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{uri}{separator}{query}")
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}

#[derive(Debug, Clone)]
pub struct YamlInspector {
    base: BaseInspector,
}

impl YamlInspector {
    pub fn new(catalog: Arc<RuntimeCatalog>) -> Self {
        Self {
            base: BaseInspector::new(catalog),
        }
    }

    fn parse_definition(&self, definition: &Mapping, meta: &mut Metadata) -> Result<(), InspectError> {
        for (key, value) in definition {
            if let Value::String(key) = key {
                self.parse_step(key, value, meta)?;
            }
        }
        Ok(())
    }

    fn parse_steps(&self, steps: &[Value], meta: &mut Metadata) -> Result<(), InspectError> {
        for raw in steps {
            let Value::Mapping(step) = raw else {
                continue;
            };
            if step.len() != 1 {
                return Err(InspectError::InvalidStep {
                    step: describe(raw),
                });
            }
            for (key, value) in step {
                match key {
                    Value::String(key) => self.parse_step(key, value, meta)?,
                    other => {
                        return Err(InspectError::UnsupportedStepKey {
                            key: describe(other),
                            step: describe(raw),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn parse_step(&self, key: &str, content: &Value, meta: &mut Metadata) -> Result<(), InspectError> {
        match key {
            "rest" => {
                meta.exposes_http_services = true;
                meta.add_required_capability(Capability::Rest);
            }
            "circuitBreaker" | "circuit-breaker" | "hystrix" => {
                meta.add_dependency(HYSTRIX_DEPENDENCY);
            }
            "marshal" | "unmarshal" => self.parse_data_format(content, meta),
            "kamelet" => match content {
                Value::String(name) => add_kamelet(meta, &format!("kamelet:{name}")),
                Value::Mapping(map) => {
                    if let Some(Value::String(name)) = map.get("name") {
                        add_kamelet(meta, &format!("kamelet:{name}"));
                    }
                }
                _ => {}
            },
            _ => {}
        }

        let mut maybe_uri = None;
        match content {
            Value::String(uri) => maybe_uri = Some(uri.clone()),
            Value::Mapping(map) => {
                for (child_key, child) in map {
                    let Value::String(child_key) = child_key else {
                        continue;
                    };
                    self.base.add_language_dependency(child_key, meta);

                    match child_key.as_str() {
                        "steps" => {
                            if let Value::Sequence(steps) = child {
                                self.parse_steps(steps, meta)?;
                            }
                        }
                        "uri" => {
                            if let Value::String(uri) = child {
                                maybe_uri = Some(with_parameters(uri, map));
                            }
                        }
                        "language" => match child {
                            Value::String(language) => {
                                self.base.add_language_dependency(language, meta)
                            }
                            Value::Mapping(_) => self.parse_step("language", child, meta)?,
                            _ => {}
                        },
                        // from/to can be nested anywhere below a step
                        _ => match child {
                            Value::Mapping(_) => self.parse_step(child_key, child, meta)?,
                            Value::Sequence(items) => {
                                for item in items {
                                    self.parse_step(child_key, item, meta)?;
                                }
                            }
                            _ => {}
                        },
                    }
                }
            }
            _ => {}
        }

        if let Some(uri) = maybe_uri.filter(|uri| !uri.is_empty()) {
            match key {
                "from" => meta.add_from_uri(uri),
                "to" | "to-d" | "toD" | "wire-tap" | "wireTap" => meta.add_to_uri(uri),
                _ => {}
            }
        }

        Ok(())
    }

    fn parse_data_format(&self, content: &Value, meta: &mut Metadata) {
        let Some(json) = content.as_mapping().and_then(|map| map.get("json")) else {
            return;
        };
        let library = json
            .as_mapping()
            .and_then(|options| options.get("library"))
            .and_then(Value::as_str)
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_JSON_DATA_FORMAT.to_string());
        self.base.add_data_format_dependency(&library, meta);
    }
}

/// The URI with the sibling `parameters` map appended, if there is one
fn with_parameters(uri: &str, endpoint: &Mapping) -> String {
    match endpoint.get("parameters") {
        Some(Value::Mapping(parameters)) => {
            let parameters: BTreeMap<String, String> = parameters
                .iter()
                .map(|(k, v)| (scalar_to_string(k), scalar_to_string(v)))
                .collect();
            append_parameters(uri, &parameters)
        }
        _ => uri.to_string(),
    }
}

impl SourceInspector for YamlInspector {
    fn language(&self) -> Option<Language> {
        Some(Language::Yaml)
    }

    fn extract(&self, source: &SourceSpec, meta: &mut Metadata) -> Result<(), InspectError> {
        ensure_resolved(source)?;

        if !source.content.trim().is_empty() {
            let definitions: Vec<Mapping> = serde_yaml::from_str(&source.content)?;
            for definition in &definitions {
                self.parse_definition(definition, meta)?;
            }
        }

        self.base.finish(&source.content, meta, false);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Flow {
    #[serde(default)]
    steps: Vec<FlowStep>,
}

#[derive(Debug, Deserialize)]
struct FlowStep {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    uri: String,
}

/// Inspector for the legacy flow dialect: the first endpoint step of a flow
/// is its consumer, every later endpoint step a producer.
#[derive(Debug, Clone)]
pub struct YamlFlowInspector {
    base: BaseInspector,
}

impl YamlFlowInspector {
    pub fn new(catalog: Arc<RuntimeCatalog>) -> Self {
        Self {
            base: BaseInspector::new(catalog),
        }
    }
}

impl SourceInspector for YamlFlowInspector {
    fn language(&self) -> Option<Language> {
        Some(Language::YamlFlow)
    }

    fn extract(&self, source: &SourceSpec, meta: &mut Metadata) -> Result<(), InspectError> {
        ensure_resolved(source)?;

        let flows: Vec<Flow> = match serde_yaml::from_str(&source.content) {
            Ok(flows) => flows,
            Err(e) => {
                debug!(source = %source.name, error = %e, "Skipping undecodable flow source");
                return Ok(());
            }
        };

        for flow in &flows {
            let mut steps = flow.steps.iter();
            if let Some(first) = steps.next() {
                if first.kind == "endpoint" {
                    meta.add_from_uri(first.uri.clone());
                }
            }
            for step in steps.filter(|step| step.kind == "endpoint") {
                meta.add_to_uri(step.uri.clone());
            }
        }

        self.base.finish(&source.content, meta, false);
        Ok(())
    }
}
