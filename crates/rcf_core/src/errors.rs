//! Error types for the forest engines

use thiserror::Error;

/// Errors raised by training, prediction and artifact handling.
///
/// `InvalidArgument` carries the exact, stable message shown to callers so
/// that request layers can surface it verbatim.
#[derive(Error, Debug)]
pub enum RcfError {
    /// Parameter or input validation failed
    #[error("{0}")]
    InvalidArgument(String),

    /// The forest cannot represent the data it was given
    #[error("Invalid model state: {0}")]
    InvalidModelState(String),

    /// Artifact bytes are malformed, tampered with, or from another schema
    #[error("Corrupt model artifact: {0}")]
    CorruptArtifact(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl RcfError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        RcfError::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        RcfError::InvalidModelState(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        RcfError::CorruptArtifact(msg.into())
    }
}

/// Result type for forest operations
pub type Result<T> = std::result::Result<T, RcfError>;
