//! Error types for am-resolve

use am_session::SessionError;
use thiserror::Error;

/// Fatal resolution errors. Everything recoverable is a
/// [`ResolveWarning`](crate::ResolveWarning) instead.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// R001: A named target has no match
    #[error("[R001] No {kind} named '{name}' was found")]
    NotFound { kind: String, name: String },

    /// R002: Several targets share the name and none was chosen
    #[error("[R002] {count} farms are named '{name}' and none was selected")]
    NoSelection { name: String, count: usize },

    /// R003: The asset status enumeration value does not exist
    #[error("[R003] Enumeration value '{path}' not found in management pack '{management_pack}'")]
    UnknownEnumeration {
        management_pack: String,
        path: String,
    },

    /// R004: The management group rejected a query
    #[error("[R004] {0}")]
    Session(#[from] SessionError),
}

/// Result type alias for ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;
