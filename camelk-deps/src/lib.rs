//! Camel K Dependencies - catalog selection and Maven dependency management
//!
//! This crate takes the metadata extracted by `camelk-core` and turns it into
//! a buildable Maven project against the right runtime catalog.
//!
//! # Features
//!
//! - **Catalog Resolution**: Exact or highest-compatible catalog for requested Camel/runtime versions
//! - **Dependency Identifiers**: `camel:`, `camel-k:`, `camel-quarkus:`, `mvn:`, `bom:` and Jitpack shorthands
//! - **Transitive Closure**: Catalog-declared dependencies and exclusions
//! - **Predefined Images**: Prebuilt images for single-component integrations
//!
//! # Usage
//!
//! ```rust,ignore
//! use camelk_core::Config;
//! use camelk_deps::IntegrationBuildUseCase;
//!
//! let use_case = IntegrationBuildUseCase::from_config(&Config::load()?)?;
//! let build = use_case.execute(&sources, &["camel:jackson"])?;
//! println!("{}", build.project.to_pom_xml()?);
//! ```
//!
//! # Architecture
//!
//! ```text
//! camelk-deps/
//! ├── domain/         # Version constraints
//! ├── services/       # Catalog resolution, dependency manager, Jitpack, images
//! └── use_cases.rs    # Source-to-project pipeline
//! ```

pub mod domain;
pub mod services;
pub mod use_cases;

pub use domain::*;
pub use services::*;
pub use use_cases::*;
