//! HTTP error responses
//!
//! Every failure is rendered as `{ success: false, error, message, details? }`
//! where `error` is a stable upper-case code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hotelix_domain::{AuthErrorCode, HotelixError};
use serde::Serialize;

/// Error returned by request handlers.
#[derive(Debug)]
pub struct ApiError(pub HotelixError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<HotelixError> for ApiError {
    fn from(value: HotelixError) -> Self {
        Self(value)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a std::collections::BTreeMap<String, String>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(&self.0)
    }

    /// Stable code reported in the `error` field.
    pub fn code(&self) -> &'static str {
        match &self.0 {
            HotelixError::Auth { code, .. } => code.as_str(),
            HotelixError::Validation { .. } => AuthErrorCode::ValidationError.as_str(),
            HotelixError::Database(_) => AuthErrorCode::DatabaseError.as_str(),
            HotelixError::NotFound(_) => "NOT_FOUND",
            HotelixError::InvalidInput(_) => "INVALID_INPUT",
            HotelixError::Forbidden(_) => "FORBIDDEN",
            HotelixError::Conflict(_) => "CONFLICT",
            HotelixError::Config(_) => "CONFIG_ERROR",
            HotelixError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

fn status_for(error: &HotelixError) -> StatusCode {
    match error {
        HotelixError::NotFound(_) => StatusCode::NOT_FOUND,
        HotelixError::Forbidden(_) => StatusCode::FORBIDDEN,
        HotelixError::InvalidInput(_) | HotelixError::Validation { .. } => StatusCode::BAD_REQUEST,
        HotelixError::Conflict(_) => StatusCode::CONFLICT,
        HotelixError::Auth { code, .. } => match code {
            AuthErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            AuthErrorCode::EmailTaken
            | AuthErrorCode::HotelNotFound
            | AuthErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            AuthErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        },
        HotelixError::Database(_) | HotelixError::Internal(_) | HotelixError::Config(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = match &self.0 {
            HotelixError::Validation { fields, .. } => Some(fields),
            _ => None,
        };
        let body =
            ErrorBody { success: false, error: self.code(), message: self.0.message(), details };

        (self.status(), Json(body)).into_response()
    }
}
