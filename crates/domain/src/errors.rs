//! Error types used throughout the application

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes reported by the authentication flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    InvalidCredentials,
    EmailTaken,
    UserNotFound,
    HotelNotFound,
    ValidationError,
    DatabaseError,
}

crate::impl_domain_status_conversions!(AuthErrorCode {
    InvalidCredentials => "INVALID_CREDENTIALS",
    EmailTaken => "EMAIL_TAKEN",
    UserNotFound => "USER_NOT_FOUND",
    HotelNotFound => "HOTEL_NOT_FOUND",
    ValidationError => "VALIDATION_ERROR",
    DatabaseError => "DATABASE_ERROR",
});

/// Main error type for Hotelix
///
/// User-facing variants (`NotFound`, `Forbidden`, `Conflict`, ...) display
/// their message verbatim so it can be surfaced to clients unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum HotelixError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    /// Field-level validation failure (field name → message).
    #[error("{message}")]
    Validation { message: String, fields: BTreeMap<String, String> },

    /// Authentication failure carrying a stable code.
    #[error("{message}")]
    Auth { code: AuthErrorCode, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HotelixError {
    /// Build an authentication error.
    pub fn auth(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self::Auth { code, message: message.into() }
    }

    /// Build a validation error from collected field errors.
    pub fn validation(fields: BTreeMap<String, String>) -> Self {
        Self::Validation { message: "Données invalides".to_string(), fields }
    }

    /// Code reported to auth clients for this error.
    pub fn auth_code(&self) -> AuthErrorCode {
        match self {
            Self::Auth { code, .. } => *code,
            Self::Validation { .. } | Self::InvalidInput(_) => AuthErrorCode::ValidationError,
            _ => AuthErrorCode::DatabaseError,
        }
    }

    /// Message without the category prefix added by `Display`.
    pub fn message(&self) -> &str {
        match self {
            Self::Database(msg)
            | Self::Config(msg)
            | Self::NotFound(msg)
            | Self::InvalidInput(msg)
            | Self::Forbidden(msg)
            | Self::Conflict(msg)
            | Self::Internal(msg) => msg,
            Self::Validation { message, .. } | Self::Auth { message, .. } => message,
        }
    }
}

/// Result type alias for Hotelix operations
pub type Result<T> = std::result::Result<T, HotelixError>;
