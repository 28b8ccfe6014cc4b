//! Error types for the demo suite.

use thiserror::Error;

use qreg_core::StateError;

/// Errors raised while configuring or running a demo.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DemoError {
    /// The state-vector engine rejected an operation.
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Reading a config file or writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML configuration could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// JSON export failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
