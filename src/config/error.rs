//! Configuration errors.

use thiserror::Error;

/// Errors that can occur when building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Generic fault message must not be empty")]
    EmptyGenericFaultMessage,

    #[error("Configuration parsing failed: {0}")]
    Parse(String),

    #[error("Configuration serialization failed: {0}")]
    Serialize(String),
}
