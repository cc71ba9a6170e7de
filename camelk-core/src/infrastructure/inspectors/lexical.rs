//! Regex based inspectors for the Java, Groovy, JavaScript and Kotlin DSLs
//!
//! Only literal string arguments are recognised. A URI built at runtime is
//! captured up to the end of its literal part (`toF("uri:%s", x)` yields
//! `uri:%s`), and calls without a literal argument are not seen at all.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::application::errors::InspectError;
use crate::domain::{Language, Metadata, SourceSpec};
use crate::infrastructure::catalog::RuntimeCatalog;
use crate::infrastructure::inspectors::base::{BaseInspector, ensure_resolved, has_rest_indicator};
use crate::infrastructure::inspectors::kamelet::add_kamelet;
use crate::infrastructure::inspectors::traits::SourceInspector;

/// Compiled endpoint patterns for one quoting convention
#[derive(Debug)]
struct EndpointPatterns {
    from: Vec<Regex>,
    to: Vec<Regex>,
    kamelet: Vec<Regex>,
}

impl EndpointPatterns {
    fn new(quotes: &[char]) -> Self {
        let mut from = Vec::new();
        let mut to = Vec::new();
        let mut kamelet = Vec::new();

        for quote in quotes {
            let uri = format!(r"\s*\(\s*{quote}([a-zA-Z0-9-]+:[^{quote}]+){quote}");
            for call in ["from", "fromF"] {
                from.push(compile(&format!("{call}{uri}")));
            }
            for call in ["to", "toD", "toF", "wireTap"] {
                to.push(compile(&format!(r"\.{call}{uri}")));
            }
            kamelet.push(compile(&format!(
                r"kamelet\s*\(\s*{quote}((?://)?[a-z0-9.-][^{quote}]*){quote}"
            )));
        }

        Self { from, to, kamelet }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid endpoint regex")
}

static DOUBLE_QUOTED: Lazy<EndpointPatterns> = Lazy::new(|| EndpointPatterns::new(&['"']));
static ANY_QUOTED: Lazy<EndpointPatterns> = Lazy::new(|| EndpointPatterns::new(&['"', '\'']));

/// First capture group of every match, in source order, without repeats
fn find_distinct(content: &str, patterns: &[Regex]) -> Vec<String> {
    let mut matches: Vec<(usize, &str)> = patterns
        .iter()
        .flat_map(|pattern| pattern.captures_iter(content))
        .filter_map(|captures| captures.get(1))
        .map(|group| (group.start(), group.as_str()))
        .collect();
    matches.sort_by_key(|(start, _)| *start);

    let mut distinct: Vec<String> = Vec::with_capacity(matches.len());
    for (_, value) in matches {
        if !distinct.iter().any(|seen| seen == value) {
            distinct.push(value.to_string());
        }
    }
    distinct
}

/// Inspector for the route DSLs embedded in general purpose languages
#[derive(Debug, Clone)]
pub struct LexicalInspector {
    language: Language,
    base: BaseInspector,
}

impl LexicalInspector {
    /// Java and Kotlin only accept double-quoted literals, Groovy and
    /// JavaScript accept both quote styles.
    pub fn new(language: Language, catalog: Arc<RuntimeCatalog>) -> Self {
        Self {
            language,
            base: BaseInspector::new(catalog),
        }
    }

    pub fn java(catalog: Arc<RuntimeCatalog>) -> Self {
        Self::new(Language::Java, catalog)
    }

    pub fn groovy(catalog: Arc<RuntimeCatalog>) -> Self {
        Self::new(Language::Groovy, catalog)
    }

    pub fn javascript(catalog: Arc<RuntimeCatalog>) -> Self {
        Self::new(Language::JavaScript, catalog)
    }

    pub fn kotlin(catalog: Arc<RuntimeCatalog>) -> Self {
        Self::new(Language::Kotlin, catalog)
    }

    fn patterns(&self) -> &'static EndpointPatterns {
        match self.language {
            Language::Groovy | Language::JavaScript => &ANY_QUOTED,
            _ => &DOUBLE_QUOTED,
        }
    }
}

impl SourceInspector for LexicalInspector {
    fn language(&self) -> Option<Language> {
        Some(self.language)
    }

    fn extract(&self, source: &SourceSpec, meta: &mut Metadata) -> Result<(), InspectError> {
        ensure_resolved(source)?;
        let content = source.content.as_str();
        let patterns = self.patterns();

        for uri in find_distinct(content, &patterns.from) {
            meta.add_from_uri(uri);
        }
        for uri in find_distinct(content, &patterns.to) {
            meta.add_to_uri(uri);
        }
        // The whole literal goes through `add_kamelet` so `kameletVersion` survives
        for reference in find_distinct(content, &patterns.kamelet) {
            add_kamelet(meta, &format!("kamelet:{reference}"));
        }

        self.base.finish(content, meta, has_rest_indicator(content));
        Ok(())
    }
}
