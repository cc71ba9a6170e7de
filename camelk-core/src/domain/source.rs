//! Integration source definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// DSL an integration source is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    Java,
    Groovy,
    #[serde(rename = "js")]
    JavaScript,
    #[serde(rename = "kts")]
    Kotlin,
    /// Legacy flow dialect, a list of `{steps: [{kind, uri}]}` records
    #[serde(rename = "flow")]
    YamlFlow,
    Yaml,
    Xml,
}

impl Language {
    /// Known languages in inference order. The first matching suffix wins, so
    /// compound extensions must precede the plain ones they end with.
    pub const ALL: [Language; 7] = [
        Language::Java,
        Language::Groovy,
        Language::JavaScript,
        Language::Kotlin,
        Language::YamlFlow,
        Language::Yaml,
        Language::Xml,
    ];

    /// File-name extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Groovy => "groovy",
            Language::JavaScript => "js",
            Language::Kotlin => "kts",
            Language::YamlFlow => "flow.yaml",
            Language::Yaml => "yaml",
            Language::Xml => "xml",
        }
    }

    /// Infer the language from a file name
    pub fn infer(name: &str) -> Option<Language> {
        Self::ALL.into_iter().find(|language| {
            name.strip_suffix(language.extension())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Java => "java",
            Language::Groovy => "groovy",
            Language::JavaScript => "js",
            Language::Kotlin => "kts",
            Language::YamlFlow => "flow",
            Language::Yaml => "yaml",
            Language::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// A single integration source as handed over by the caller.
///
/// The engine only inspects inline content: `content_ref` must be empty and
/// `compression` false by the time a source reaches an inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceSpec {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_ref: String,
    pub compression: bool,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Explicit language, falling back to inference from the name
    pub fn resolved_language(&self) -> Option<Language> {
        self.language.or_else(|| Language::infer(&self.name))
    }

    /// Whether the content is inline and uncompressed
    pub fn is_resolved(&self) -> bool {
        self.content_ref.is_empty() && !self.compression
    }
}
