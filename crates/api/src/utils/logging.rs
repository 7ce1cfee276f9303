//! Structured request logging

use std::time::Duration;

use hotelix_domain::HotelixError;
use tracing::{info, warn};

/// Log the outcome of a request with structured fields.
///
/// `operation` is a stable identifier such as `"interventions::create"`.
/// Callers must not forward credentials or other sensitive values in it.
#[inline]
pub fn log_request_outcome(operation: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(operation, duration_ms, "request_success");
    } else {
        warn!(operation, duration_ms, "request_failure");
    }
}

/// Convert a `HotelixError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &HotelixError) -> &'static str {
    match error {
        HotelixError::Database(_) => "database",
        HotelixError::Config(_) => "config",
        HotelixError::NotFound(_) => "not_found",
        HotelixError::InvalidInput(_) => "invalid_input",
        HotelixError::Forbidden(_) => "forbidden",
        HotelixError::Conflict(_) => "conflict",
        HotelixError::Validation { .. } => "validation",
        HotelixError::Auth { .. } => "auth",
        HotelixError::Internal(_) => "internal",
    }
}
