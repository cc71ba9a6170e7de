//! Configuration validation module

use crate::config::{ImageConfig, LoggingConfig, MavenConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Logging configuration error: {message}")]
    Logging { message: String },

    #[error("Image configuration error: {message}")]
    Images { message: String },

    #[error("Maven configuration error: {message}")]
    Maven { message: String },
}

impl ValidationError {
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn images(message: impl Into<String>) -> Self {
        Self::Images {
            message: message.into(),
        }
    }

    pub fn maven(message: impl Into<String>) -> Self {
        Self::Maven {
            message: message.into(),
        }
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.level.trim().is_empty() {
            return Err(ValidationError::logging("level cannot be empty"));
        }
        if !matches!(self.format.as_str(), "json" | "pretty") {
            return Err(ValidationError::logging(format!(
                "format must be 'json' or 'pretty', got '{}'",
                self.format
            )));
        }
        Ok(())
    }
}

impl Validate for ImageConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.repository.trim().is_empty() {
            return Err(ValidationError::images("repository cannot be empty"));
        }
        Ok(())
    }
}

impl Validate for MavenConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let url = url::Url::parse(&self.jitpack_repository_url).map_err(|e| {
            ValidationError::maven(format!(
                "invalid jitpack_repository_url '{}': {}",
                self.jitpack_repository_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::maven(
                "jitpack_repository_url must use http or https",
            ));
        }
        if self.jitpack_default_version.trim().is_empty() {
            return Err(ValidationError::maven(
                "jitpack_default_version cannot be empty",
            ));
        }
        Ok(())
    }
}
