//! Error types for the Codex audit log.
//!
//! All fallible operations return `CodexResult<T>`. Schema violations are
//! not errors: they are reported as data in a `SchemaReport`.

use thiserror::Error;

/// The unified error type for logging and integrity checking.
#[derive(Debug, Error)]
pub enum CodexError {
    /// A required input field was absent or empty when building an event.
    ///
    /// Raised before anything is written, so no partial record ever exists.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A log or schema file needed by the operation does not exist.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// A file exists but does not hold the expected JSON.
    #[error("failed to parse '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// Any other filesystem failure while reading or writing a log.
    #[error("i/o failure on '{path}': {reason}")]
    Io { path: String, reason: String },

    /// The schema document is valid JSON but not a usable JSON Schema.
    #[error("schema compilation failed: {reason}")]
    SchemaCompile { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The advisory lock guarding a log file could not be acquired.
    #[error("failed to lock '{path}': {reason}")]
    LockFailed { path: String, reason: String },
}

/// Convenience alias used throughout the Codex crates.
pub type CodexResult<T> = Result<T, CodexError>;
