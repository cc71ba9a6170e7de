//! Streaming inspector for the XML DSL

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::sync::Arc;

use crate::application::errors::InspectError;
use crate::domain::{Capability, Language, Metadata, SourceSpec};
use crate::infrastructure::catalog::RuntimeCatalog;
use crate::infrastructure::inspectors::base::{
    BaseInspector, DEFAULT_JSON_DATA_FORMAT, HYSTRIX_DEPENDENCY, ensure_resolved,
};
use crate::infrastructure::inspectors::kamelet::add_kamelet;
use crate::infrastructure::inspectors::traits::SourceInspector;

/// Scans start tags only; no tree is built
#[derive(Debug, Clone)]
pub struct XmlInspector {
    base: BaseInspector,
}

impl XmlInspector {
    pub fn new(catalog: Arc<RuntimeCatalog>) -> Self {
        Self {
            base: BaseInspector::new(catalog),
        }
    }

    fn visit(&self, element: &BytesStart<'_>, meta: &mut Metadata) -> Result<(), InspectError> {
        let local_name = element.local_name();
        let name = String::from_utf8_lossy(local_name.as_ref());

        match name.as_ref() {
            "rest" | "restConfiguration" => {
                meta.exposes_http_services = true;
                meta.add_required_capability(Capability::Rest);
            }
            "openApi" => {
                if let Some(artifact) = self.base.catalog().artifact_by_scheme("rest-openapi") {
                    meta.add_dependency(artifact.dependency_id());
                }
            }
            "circuitBreaker" => meta.add_required_capability(Capability::CircuitBreaker),
            "hystrix" => meta.add_dependency(HYSTRIX_DEPENDENCY),
            "json" => {
                let library = attribute(element, "library")?
                    .map(|library| library.to_lowercase())
                    .unwrap_or_else(|| DEFAULT_JSON_DATA_FORMAT.to_string());
                self.base.add_data_format_dependency(&library, meta);
            }
            "language" => {
                if let Some(language) = attribute(element, "language")? {
                    self.base.add_language_dependency(&language, meta);
                }
            }
            "deadLetterChannel" => {
                if let Some(uri) = attribute(element, "deadLetterUri")? {
                    let (artifact, scheme) = self.base.catalog().decode_component(&uri);
                    if let Some(artifact) = artifact {
                        meta.add_dependency(artifact.dependency_id());
                    }
                    if scheme.is_some_and(|scheme| scheme.id == "kamelet") {
                        add_kamelet(meta, &uri);
                    }
                    meta.add_error_handler_uri(uri);
                }
            }
            "from" | "fromF" => {
                if let Some(uri) = attribute(element, "uri")? {
                    meta.add_from_uri(uri);
                }
            }
            "to" | "toD" | "toF" | "wireTap" => {
                if let Some(uri) = attribute(element, "uri")? {
                    meta.add_to_uri(uri);
                }
            }
            "kamelet" => {
                if let Some(kamelet) = attribute(element, "name")? {
                    add_kamelet(meta, &format!("kamelet:{kamelet}"));
                }
            }
            _ => {}
        }

        self.base.add_language_dependency(&name, meta);
        Ok(())
    }
}

/// Unescaped value of the attribute with the given local name
fn attribute(element: &BytesStart<'_>, local_name: &str) -> Result<Option<String>, InspectError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local_name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

impl SourceInspector for XmlInspector {
    fn language(&self) -> Option<Language> {
        Some(Language::Xml)
    }

    fn extract(&self, source: &SourceSpec, meta: &mut Metadata) -> Result<(), InspectError> {
        ensure_resolved(source)?;

        let mut reader = Reader::from_str(&source.content);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref element) | Event::Empty(ref element) => {
                    self.visit(element, meta)?
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        self.base.finish(&source.content, meta, false);
        Ok(())
    }
}
