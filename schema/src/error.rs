//! Error types for schema files.

use optparse_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while loading a schema or building its parser.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// An option the schema declares was rejected on registration.
    #[error("invalid option: {0}")]
    ConfigError(#[from] ConfigError),

    /// A `range` that cannot apply (non-numeric kind, or `min` above `max`).
    #[error("invalid range for option {option}: {reason}")]
    InvalidRange { option: String, reason: String },
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
