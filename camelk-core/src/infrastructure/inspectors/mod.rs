//! Language inspectors
//!
//! One inspector per source language, selected through [`InspectorFactory`].

pub mod base;
pub mod kamelet;
pub mod lexical;
pub mod traits;
pub mod xml;
pub mod yaml;

pub use base::{BaseInspector, DEFAULT_JSON_DATA_FORMAT, HYSTRIX_DEPENDENCY};
pub use kamelet::{KAMELET_VERSION_PROPERTY, add_kamelet, extract_kamelet};
pub use lexical::LexicalInspector;
pub use traits::{InspectorFactory, NoopInspector, SourceInspector};
pub use xml::XmlInspector;
pub use yaml::{YamlFlowInspector, YamlInspector, append_parameters};
