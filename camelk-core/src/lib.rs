//! Camel K Core - source inspection and runtime catalog for Camel K integrations
//!
//! This crate turns integration sources into [`Metadata`](domain::Metadata):
//! the endpoints a route consumes from and produces to, the Maven
//! dependencies its components need, the platform capabilities it requires
//! and the Kamelets it references.
//!
//! # Modules
//!
//! - [`config`]: Typed configuration from TOML/YAML files and environment variables
//! - [`domain`]: Sources, metadata, catalog documents and the Maven project model
//! - [`application`]: Error types
//! - [`infrastructure`]: Catalog indexing, language inspectors and POM rendering
//! - [`logging`]: Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! camelk-core/
//! ├── domain/           # Plain data: sources, metadata, catalog, Maven model
//! ├── application/      # Errors
//! ├── infrastructure/
//! │   ├── catalog/      # RuntimeCatalog indices and loaders
//! │   ├── inspectors/   # Java/Groovy/JS/Kotlin, XML, YAML and legacy flow
//! │   └── maven/        # pom.xml writer
//! └── config/           # Configuration management
//! ```
//!
//! # Extracting metadata
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use camelk_core::domain::SourceSpec;
//! use camelk_core::infrastructure::{InspectorFactory, load_default_catalog};
//!
//! let factory = InspectorFactory::new(Arc::new(load_default_catalog()?));
//! let meta = factory.extract(&SourceSpec::new("Routes.java", content))?;
//! ```
//!
//! # Configuration
//!
//! Environment variables use the `CAMELK__` prefix with double underscore separators:
//!
//! ```bash
//! CAMELK__IMAGES__REPOSITORY=quay.io/example/camel-k
//! CAMELK__CATALOG__PROVIDER=quarkus
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
