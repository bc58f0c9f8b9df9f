//! Error types for GzFlow operations.

use std::io;
use thiserror::Error;

/// The main error type for GzFlow operations.
#[derive(Debug, Error)]
pub enum GzFlowError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration value the engine cannot honor.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending value.
        message: String,
    },

    /// The block engine reported a failure it cannot recover from.
    ///
    /// A session that surfaces this error must be discarded; there is no
    /// retry or partial-recovery path.
    #[error("Engine failure: {message}")]
    EngineFailure {
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for GzFlow operations.
pub type Result<T> = std::result::Result<T, GzFlowError>;

impl GzFlowError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an engine failure error.
    pub fn engine_failure(message: impl Into<String>) -> Self {
        Self::EngineFailure {
            message: message.into(),
        }
    }
}
