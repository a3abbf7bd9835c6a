//! Retry with exponential backoff.
//!
//! This module provides:
//! - `RetryPolicy`: attempt budget and backoff schedule
//! - `with_retry`: retry every failure up to the budget
//! - `with_retry_if`: retry only failures accepted by a predicate
//! - `with_retry_cancellable`: the same, abortable through a `CancellationToken`
//!
//! The loop itself is driven by `tokio-retry`; the terminal error is always the
//! operation's own last error, never a wrapper.

mod policy;
mod run;

pub use policy::{Backoff, RetryPolicy};
pub use run::{with_retry, with_retry_cancellable, with_retry_if, RetryError};
