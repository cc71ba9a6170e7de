//! Traits for source inspectors

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::application::errors::InspectError;
use crate::domain::{IntegrationMetadata, Language, Metadata, SourceSpec};
use crate::infrastructure::catalog::RuntimeCatalog;
use crate::infrastructure::inspectors::base::ensure_resolved;
use crate::infrastructure::inspectors::lexical::LexicalInspector;
use crate::infrastructure::inspectors::xml::XmlInspector;
use crate::infrastructure::inspectors::yaml::{YamlFlowInspector, YamlInspector};

/// Trait for extracting route metadata from one source
pub trait SourceInspector: Send + Sync {
    /// Language handled by this inspector, `None` for the fallback
    fn language(&self) -> Option<Language>;

    /// Add everything found in `source` to `meta`
    fn extract(&self, source: &SourceSpec, meta: &mut Metadata) -> Result<(), InspectError>;
}

/// Inspector for sources in an unrecognised language: finds nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInspector;

impl SourceInspector for NoopInspector {
    fn language(&self) -> Option<Language> {
        None
    }

    fn extract(&self, _source: &SourceSpec, _meta: &mut Metadata) -> Result<(), InspectError> {
        Ok(())
    }
}

/// Factory selecting the inspector for a source language
pub struct InspectorFactory {
    inspectors: Vec<Box<dyn SourceInspector>>,
    index: HashMap<Language, usize>,
    fallback: NoopInspector,
    catalog: Arc<RuntimeCatalog>,
}

impl InspectorFactory {
    /// Create a factory with one inspector per supported language
    pub fn new(catalog: Arc<RuntimeCatalog>) -> Self {
        let inspectors: Vec<Box<dyn SourceInspector>> = vec![
            Box::new(LexicalInspector::java(catalog.clone())),
            Box::new(LexicalInspector::groovy(catalog.clone())),
            Box::new(LexicalInspector::javascript(catalog.clone())),
            Box::new(LexicalInspector::kotlin(catalog.clone())),
            Box::new(XmlInspector::new(catalog.clone())),
            Box::new(YamlInspector::new(catalog.clone())),
            Box::new(YamlFlowInspector::new(catalog.clone())),
        ];

        let index = inspectors
            .iter()
            .enumerate()
            .filter_map(|(idx, inspector)| inspector.language().map(|language| (language, idx)))
            .collect();

        Self {
            inspectors,
            index,
            fallback: NoopInspector,
            catalog,
        }
    }

    pub fn catalog(&self) -> &Arc<RuntimeCatalog> {
        &self.catalog
    }

    /// Inspector for `language`, the no-op inspector when there is none
    pub fn inspector_for(&self, language: Option<Language>) -> &dyn SourceInspector {
        language
            .and_then(|language| self.index.get(&language))
            .map(|&idx| self.inspectors[idx].as_ref())
            .unwrap_or(&self.fallback)
    }

    /// Inspector for a source, using its declared or inferred language
    pub fn inspector_for_source(&self, source: &SourceSpec) -> &dyn SourceInspector {
        self.inspector_for(source.resolved_language())
    }

    /// Metadata of a single source
    pub fn extract(&self, source: &SourceSpec) -> Result<Metadata, InspectError> {
        ensure_resolved(source)?;

        let inspector = self.inspector_for_source(source);
        if inspector.language().is_none() {
            debug!(source = %source.name, "No inspector for source language");
        }

        let mut meta = Metadata::default();
        inspector.extract(source, &mut meta)?;
        debug!(
            source = %source.name,
            from = meta.from_uris.len(),
            to = meta.to_uris.len(),
            dependencies = meta.dependencies.len(),
            "Extracted source metadata"
        );
        Ok(meta)
    }

    /// Merged metadata of every source of an integration, stopping at the
    /// first failing source
    pub fn extract_sources(&self, sources: &[SourceSpec]) -> Result<IntegrationMetadata, InspectError> {
        let mut integration = IntegrationMetadata::default();
        for source in sources {
            let meta = self.extract(source)?;
            integration.push(&source.name, meta);
        }
        Ok(integration)
    }

    /// Languages with a dedicated inspector
    pub fn supported_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.index.keys().copied().collect();
        languages.sort_by_key(|language| {
            Language::ALL.iter().position(|candidate| candidate == language)
        });
        languages
    }

    pub fn is_supported(&self, language: Language) -> bool {
        self.index.contains_key(&language)
    }
}

impl std::fmt::Debug for InspectorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InspectorFactory")
            .field("languages", &self.supported_languages())
            .field("runtime_version", &self.catalog.runtime_version())
            .finish()
    }
}
