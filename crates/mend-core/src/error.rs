//! Unified error types for Mend

use thiserror::Error;

/// Unified error type for all Mend operations
#[derive(Error, Debug)]
pub enum MendError {
    // Input errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    // Oracle errors
    #[error("oracle authentication failed: {0}")]
    OracleAuth(String),

    #[error("oracle request failed: {0}")]
    OracleRequest(String),

    #[error("oracle returned a malformed response: {0}")]
    OracleResponse(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl MendError {
    /// True for any of the oracle failure kinds (auth, transport, malformed
    /// response). The repair loop uses this to stop a run instead of feeding
    /// garbage back to the executor.
    pub fn is_oracle_failure(&self) -> bool {
        matches!(
            self,
            MendError::OracleAuth(_) | MendError::OracleRequest(_) | MendError::OracleResponse(_)
        )
    }
}

/// Result type alias using MendError
pub type Result<T> = std::result::Result<T, MendError>;
