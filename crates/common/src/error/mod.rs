//! Common error types and classification
//!
//! `CommonError` covers failure patterns shared by the reusable modules of
//! this crate (hashing, configuration). Module-specific errors compose with
//! it through `#[from]` and implement [`ErrorClassification`] so callers can
//! decide how loudly to log and whether a retry makes sense.
//!
//! ```rust
//! use hotelix_common::error::{CommonError, ErrorClassification, ErrorSeverity};
//!
//! let err = CommonError::config_field("argon2", "memory cost too low");
//! assert!(!err.is_retryable());
//! assert_eq!(err.severity(), ErrorSeverity::Critical);
//! ```

use std::fmt;

/// Result alias for operations returning [`CommonError`]
pub type CommonResult<T> = Result<T, CommonError>;

/// Shared error variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Configuration-related errors
    Config { message: String, field: Option<String> },

    /// Internal errors that shouldn't normally occur
    Internal { message: String, context: Option<String> },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message, field: Some(field) } => {
                write!(f, "Configuration error in field '{field}': {message}")
            }
            Self::Config { message, field: None } => write!(f, "Configuration error: {message}"),
            Self::Internal { message, context: Some(ctx) } => {
                write!(f, "Internal error ({ctx}): {message}")
            }
            Self::Internal { message, context: None } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for CommonError {}

impl CommonError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), field: None }
    }

    pub fn config_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), field: Some(field.into()) }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), context: None }
    }

    /// Attach context to an internal error; other variants are returned
    /// unchanged.
    #[must_use]
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        match self {
            Self::Internal { message, .. } => Self::Internal { message, context: Some(ctx.into()) },
            other => other,
        }
    }
}

/// Classification shared by every error type in the workspace
pub trait ErrorClassification {
    /// Transient failures that may succeed when attempted again
    fn is_retryable(&self) -> bool;

    /// Severity used for log levels
    fn severity(&self) -> ErrorSeverity;

    /// Data corruption, invariant violations, broken configuration
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Critical
    }
}
