//! Camel K integration planning
//!
//! Umbrella crate over the workspace members: source inspection and the
//! runtime catalog live in [`camelk_core`], catalog selection and Maven
//! dependency resolution in [`camelk_deps`].

pub use camelk_core::{Config, init_tracing};
pub use camelk_deps::{IntegrationBuild, IntegrationBuildUseCase};

// Re-export for convenience
pub use camelk_core;
pub use camelk_deps;
