//! Structured logging with tracing

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Error returned when the global subscriber cannot be installed
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    Filter { filter: String, message: String },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the filter from `RUST_LOG`, falling back to the configured level
fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| LoggingError::Filter {
        filter: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global tracing subscriber.
///
/// `format = "json"` emits one JSON object per event, anything else the
/// human-readable formatter. A second call fails instead of panicking.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = env_filter(config)?;

    let result = if config.format == "json" {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        fmt().with_env_filter(filter).with_target(false).try_init()
    };

    result.map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        // SAFETY: tests in this module do not read RUST_LOG concurrently
        unsafe { std::env::remove_var("RUST_LOG") };
        let config = LoggingConfig {
            level: "camelk=verbose".to_string(),
            format: "pretty".to_string(),
        };
        assert!(matches!(
            init_tracing(&config),
            Err(LoggingError::Filter { .. })
        ));
    }
}
