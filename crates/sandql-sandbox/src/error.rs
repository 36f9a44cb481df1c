//! Sandbox error types

use thiserror::Error;

/// Errors raised outside the query engine itself
#[derive(Error, Debug)]
pub enum SandboxError {
    // ========== Query ==========
    #[error(transparent)]
    Query(#[from] sandql_core::Error),

    // ========== Files ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    // ========== Practice ==========
    #[error("No practice task with id {0}")]
    UnknownTask(u32),
}

/// Result type alias for sandbox operations
pub type Result<T> = std::result::Result<T, SandboxError>;
