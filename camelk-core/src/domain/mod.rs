//! Domain layer
//!
//! Plain data: integration sources, extracted metadata, the declarative
//! runtime catalog and the Maven project model.

pub mod catalog;
pub mod maven;
pub mod metadata;
pub mod source;

pub use catalog::*;
pub use maven::*;
pub use metadata::*;
pub use source::*;
