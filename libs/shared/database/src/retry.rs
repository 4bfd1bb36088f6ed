use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use tracing::warn;

use crate::store::StoreError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const BASE_DELAY_MS: u64 = 200;

/// Only transient failures earn another attempt: connection/timeout errors
/// and 429/5xx responses. 4xx responses are final.
pub fn is_transient(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Network(e)) => e.is_connect() || e.is_timeout(),
        Some(StoreError::Api { status, .. }) => *status == 429 || *status >= 500,
        None => false,
    }
}

/// Bounded retry with exponential backoff and jitter, applied once at the
/// store-client boundary rather than per call site.
pub async fn with_retry<T, F, Fut>(op: &str, max_attempts: u32, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_transient(&err) => {
                let jitter = rand::thread_rng().gen_range(0..BASE_DELAY_MS);
                let delay = BASE_DELAY_MS * 2u64.pow(attempt - 1) + jitter;
                warn!(
                    "{} failed (attempt {}/{}), retrying in {}ms: {}",
                    op, attempt, max_attempts, delay, err
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            Err(err) => return Err(err),
        }
    }
}
