//! Maven project rendering

pub mod pom;
