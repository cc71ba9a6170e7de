//! Catalog and dependency services
//!
//! Everything between the merged integration metadata and a buildable
//! Maven project.

pub mod catalog_resolution;
pub mod dependency_manager;
pub mod dependency_normalization;
pub mod jitpack;
pub mod predefined_image;

pub use catalog_resolution::*;
pub use dependency_manager::*;
pub use dependency_normalization::*;
pub use predefined_image::*;
