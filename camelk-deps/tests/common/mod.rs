//! Common test utilities for camelk-deps

pub mod fixtures;

pub use fixtures::*;
