//! Domain models for catalog resolution

pub mod version_constraint;

pub use version_constraint::*;
