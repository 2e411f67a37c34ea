//! Error types for am-core

use thiserror::Error;

/// Core error type for assetmon
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Unknown asset status name
    #[error("[C004] Unknown asset status '{name}'. Expected one of: {expected}")]
    InvalidStatus { name: String, expected: String },

    /// C005: Unknown farm version
    #[error("[C005] Unknown farm version '{value}'")]
    InvalidFarmVersion { value: String },

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C007: YAML parse error
    #[error("[C007] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
