//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::RuntimeProvider;

pub mod validation;

pub use validation::{Validate, ValidationError};

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub images: ImageConfig,
    pub maven: MavenConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `json` or `pretty`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Runtime catalog selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file to load instead of the embedded default
    pub path: Option<PathBuf>,
    /// Provider assumed when a request does not name one
    pub provider: RuntimeProvider,
}

/// Predefined integration images
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Repository the per-component images are published to
    pub repository: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            repository: "docker.io/apache/camel-k".to_string(),
        }
    }
}

/// Maven project generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MavenConfig {
    pub jitpack_repository_url: String,
    /// Version assigned to Jitpack coordinates that do not carry one
    pub jitpack_default_version: String,
}

impl Default for MavenConfig {
    fn default() -> Self {
        Self {
            jitpack_repository_url: "https://jitpack.io".to_string(),
            jitpack_default_version: "main-SNAPSHOT".to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.images.validate()?;
        self.maven.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("CAMELK_ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Local overrides and environment variables have the highest priority
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CAMELK").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a single file, still honouring environment overrides
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, ConfigLoadError> {
        let config: Config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("CAMELK").separator("__"))
            .build()?
            .try_deserialize()?;
        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
