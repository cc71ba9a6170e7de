//! Application layer
//!
//! Error types shared by the inspectors, the catalog loader and the Maven model.

pub mod errors;

pub use errors::*;
