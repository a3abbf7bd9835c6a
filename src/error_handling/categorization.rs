//! Error retriability.
//!
//! Decides which failures inside the analysis retry loop are worth another attempt.

use anyhow::Error;

use crate::analysis::AnalysisFailure;
use crate::validation::ValidationError;

/// HTTP status for rate limiting; retried despite being a 4xx.
const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Determines if an error is retriable (should be retried).
///
/// Typed causes anywhere in the chain decide first. Only when none is
/// recognized is the message of the root cause inspected; text added by
/// context layers never changes the outcome.
///
/// # Retriable Errors
///
/// - Network timeouts, connection and request failures (`reqwest::Error`)
/// - Server errors (5xx) and rate limiting (429)
/// - `AnalysisFailure::Transient`
/// - Anything unrecognized (might be a transient network issue)
///
/// # Non-Retriable Errors
///
/// - `ValidationError` (the input will not change between attempts)
/// - URL parsing errors
/// - Client errors (4xx except 429), redirect and decode errors
/// - `AnalysisFailure::Permanent`
pub fn is_retriable_error(error: &Error) -> bool {
    for cause in error.chain() {
        if let Some(retriable) = classify_typed(cause) {
            return retriable;
        }
    }

    // Fallback for errors that only carry a message
    let msg = error.root_cause().to_string().to_lowercase();
    let permanent = ["404", "not found", "403", "forbidden", "401", "unauthorized"];
    !permanent.iter().any(|token| msg.contains(token))
}

/// Verdict for a cause of a known type, `None` when the type says nothing.
fn classify_typed(cause: &(dyn std::error::Error + 'static)) -> Option<bool> {
    if cause.downcast_ref::<ValidationError>().is_some() {
        return Some(false);
    }

    if cause.downcast_ref::<url::ParseError>().is_some() {
        return Some(false);
    }

    if let Some(failure) = cause.downcast_ref::<AnalysisFailure>() {
        return Some(failure.is_transient());
    }

    let reqwest_err = cause.downcast_ref::<reqwest::Error>()?;
    if let Some(status) = reqwest_err.status() {
        if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
            return Some(true);
        }
        if status.is_client_error() {
            return Some(false);
        }
        if status.is_server_error() {
            return Some(true);
        }
    }

    if reqwest_err.is_timeout() || reqwest_err.is_connect() || reqwest_err.is_request() {
        return Some(true);
    }

    if reqwest_err.is_redirect() || reqwest_err.is_decode() || reqwest_err.is_builder() {
        return Some(false);
    }

    None
}
