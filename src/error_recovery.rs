// src/error_recovery.rs
//! Retry with linearly increasing backoff for transport operations.

use crate::error::AppError;
use std::time::Duration;

/// Retries an async operation with a linearly increasing delay.
///
/// The delay before attempt `n + 1` is `base_delay * n`, so a 500ms base
/// waits 500ms, then 1s, then 1.5s. The final failure propagates unchanged.
/// Callers decide what counts as retryable by what they return as `Err`;
/// completed-but-erroneous responses must be returned as `Ok` upstream of
/// this helper so they are never retried.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                last_error = Some(e);

                if attempt < max_attempts {
                    let delay = base_delay * attempt;
                    log::warn!("Attempt {} failed, retrying after {:?}", attempt, delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::InternalError {
        message: "Retry failed with no error".to_string(),
        source: None,
    }))
}
