//! Infrastructure Layer - catalog loading, source inspection and POM rendering

pub mod catalog;
pub mod inspectors;
pub mod maven;

pub use catalog::*;
pub use inspectors::{InspectorFactory, SourceInspector};
