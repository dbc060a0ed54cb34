//! Worker-specific error types.
//!
//! These double as the error type of the introspection collaborator: any
//! [`Inspector`](crate::metadata::Inspector) reports failures as a
//! [`WorkerError`].

use std::io;
use thiserror::Error;

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Errors that can occur while talking to the database worker.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Failed to spawn the worker process.
    #[error("failed to spawn worker process: {0}")]
    SpawnFailed(#[source] io::Error),

    /// Failed to write to worker stdin.
    #[error("failed to write to worker: {0}")]
    WriteFailed(#[source] io::Error),

    /// Failed to serialize request to JSON.
    #[error("failed to serialize request: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Failed to deserialize response from JSON.
    #[error("failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),

    /// Request timed out waiting for response.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Worker process exited unexpectedly.
    #[error("worker process exited unexpectedly")]
    WorkerExited,

    /// Response channel was closed.
    #[error("response channel closed unexpectedly")]
    ChannelClosed,

    /// Database driver not found.
    #[error("database driver not found: {0}")]
    DriverNotFound(String),

    /// Database connection failed.
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// The database refused an introspection query.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Method not found.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// Any other error reported by the worker.
    #[error("worker error: {message} (code: {code})")]
    Remote { code: String, message: String },
}

impl WorkerError {
    /// Create a remote error from an error response.
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Classify a worker error code.
    pub fn from_code(code: &str, message: &str) -> Self {
        match code {
            "DRIVER_NOT_FOUND" => Self::DriverNotFound(message.to_string()),
            "CONNECTION_FAILED" => Self::ConnectionFailed(message.to_string()),
            "PERMISSION_DENIED" => Self::PermissionDenied(message.to_string()),
            "INVALID_REQUEST" => Self::InvalidRequest(message.to_string()),
            "METHOD_NOT_FOUND" => Self::MethodNotFound(message.to_string()),
            "WORKER_EXITED" => Self::WorkerExited,
            _ => Self::remote(code, message),
        }
    }

    /// Check if the database (or the path to it) is unreachable, as opposed
    /// to a single introspection query failing.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::SpawnFailed(_)
                | Self::WriteFailed(_)
                | Self::Timeout(_)
                | Self::WorkerExited
                | Self::ChannelClosed
                | Self::DriverNotFound(_)
                | Self::ConnectionFailed(_)
        )
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for WorkerError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::ChannelClosed
    }
}
