//! Shared helpers for the HTTP layer

pub mod logging;
pub mod request_helpers;

pub use request_helpers::execute_logged;
