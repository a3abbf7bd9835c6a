//! Retry loops: run an async operation until success, exhaustion or cancellation.

use std::future::Future;

use log::{debug, warn};
use thiserror::Error;
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use super::policy::RetryPolicy;

/// Failure of a cancellable retry sequence.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The token fired before the sequence finished. The in-flight attempt
    /// or backoff timer was dropped.
    #[error("retry sequence cancelled")]
    Cancelled,

    /// The last error of the operation, unchanged.
    #[error("{0}")]
    Failed(E),
}

impl<E> RetryError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled)
    }

    /// The operation's error, if the sequence was not cancelled.
    pub fn into_inner(self) -> Option<E> {
        match self {
            RetryError::Cancelled => None,
            RetryError::Failed(e) => Some(e),
        }
    }
}

/// Runs `operation`, retrying every failure per `policy`.
///
/// Returns the first success, or the last error unchanged once
/// `policy.max_attempts()` attempts have failed.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    with_retry_if(policy, operation, |_: &E| true).await
}

/// Like [`with_retry`], but stops as soon as `should_retry` rejects an error.
///
/// Attempts are strictly sequential: attempt `k + 1` starts only after attempt
/// `k` has failed and its backoff delay has elapsed.
pub async fn with_retry_if<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&E) -> bool,
{
    let total = policy.max_attempts();
    let mut attempt = 0u32;
    let action = || {
        attempt += 1;
        let n = attempt;
        let fut = operation();
        async move {
            let result = fut.await;
            if result.is_err() {
                warn!("Attempt {n}/{total} failed");
            }
            result
        }
    };

    RetryIf::spawn(policy.delays(), action, should_retry).await
}

/// Like [`with_retry_if`], but aborts when `cancel` fires.
///
/// Cancellation is checked before the first attempt and observed during every
/// attempt and every backoff delay.
pub async fn with_retry_cancellable<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    operation: F,
    should_retry: P,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&E) -> bool,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Retry sequence cancelled");
            Err(RetryError::Cancelled)
        }
        result = with_retry_if(policy, operation, should_retry) => {
            result.map_err(RetryError::Failed)
        }
    }
}
