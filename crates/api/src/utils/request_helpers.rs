//! Handler execution helpers
//!
//! Times a service call and logs its outcome so route handlers stay focused
//! on request and response mapping.

use std::future::Future;
use std::time::Instant;

use hotelix_domain::Result as DomainResult;
use tracing::debug;

use crate::utils::logging::{error_label, log_request_outcome};

/// Run a service call, logging elapsed time and the error label on failure.
///
/// ```rust,ignore
/// let zones = execute_logged("interventions::zones", || async {
///     ctx.interventions.zones(hotel_id).await
/// })
/// .await?;
/// ```
pub async fn execute_logged<F, Fut, T>(operation: &str, call: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = call().await;
    let elapsed = start.elapsed();

    log_request_outcome(operation, elapsed, result.is_ok());
    if let Err(err) = &result {
        debug!(operation, error_type = error_label(err), error = %err, "request error detail");
    }

    result
}
