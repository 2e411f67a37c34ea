//! Error types for am-session

use thiserror::Error;

/// Management group session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Connection error (S001)
    #[error("[S001] Connection to management server failed: {0}")]
    ConnectionError(String),

    /// Query error (S002)
    #[error("[S002] Management group query failed: {0}")]
    QueryError(String),

    /// Object not found (S003)
    #[error("[S003] Object not found: {0}")]
    ObjectNotFound(String),

    /// Property not declared (S004)
    #[error("[S004] Object {object} does not declare property '{key}'")]
    PropertyNotDeclared { object: String, key: String },

    /// Write rejected (S005)
    #[error("[S005] Write to {object} rejected: {reason}")]
    WriteRejected { object: String, reason: String },

    /// Invalid data in the backing store (S006)
    #[error("[S006] Invalid management group data: {0}")]
    InvalidData(String),

    /// Mutex poisoned (S007)
    #[error("[S007] Session mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for SessionError
pub type SessionResult<T> = Result<T, SessionError>;

impl From<duckdb::Error> for SessionError {
    fn from(err: duckdb::Error) -> Self {
        SessionError::QueryError(err.to_string())
    }
}
