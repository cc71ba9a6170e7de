//! Common test utilities for camelk-core

pub mod fixtures;

pub use fixtures::*;
