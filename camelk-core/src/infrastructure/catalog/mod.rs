//! Runtime catalog indexing and loading

pub mod loader;
pub mod runtime_catalog;

pub use loader::*;
pub use runtime_catalog::*;
