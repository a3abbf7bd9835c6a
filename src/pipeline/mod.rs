//! Profile analysis pipeline: validate, then probe and analyze under retry.

mod context;

use anyhow::Context as _;
use log::{debug, error, info, warn};
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::accessibility::AccessibilityResult;
use crate::analysis::AnalysisScores;
use crate::error_handling::{is_retriable_error, ErrorNotice, NoticeKind};
use crate::error_log::ErrorEntry;
use crate::retry::{with_retry_cancellable, RetryError};
use crate::validation::{validate_url, Platform, ValidationError};

pub use context::ProfileContext;

/// Label recorded in the error log for failures tracked by this pipeline.
const ERROR_LOG_CONTEXT: &str = "analyze_profile";

/// Result of a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub normalized_url: String,
    pub platform: Platform,
    pub accessibility: AccessibilityResult,
    pub scores: AnalysisScores,
    /// Retries made before success (attempts - 1)
    pub retry_count: u32,
}

/// Why an analysis did not produce a report.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Input rejected before any network activity.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Last error of the retried operation, after the budget was spent or a
    /// non-retriable error was hit.
    #[error(transparent)]
    Operation(anyhow::Error),

    /// The caller cancelled the pending retry sequence.
    #[error("analysis cancelled")]
    Cancelled,
}

impl ProfileError {
    /// Payload for a UI error display.
    pub fn notice(&self) -> ErrorNotice {
        match self {
            ProfileError::Validation(e) => ErrorNotice {
                error: e.to_string(),
                kind: NoticeKind::Validation,
            },
            ProfileError::Operation(e) => ErrorNotice {
                error: format!("{e:#}"),
                kind: NoticeKind::Network,
            },
            ProfileError::Cancelled => ErrorNotice {
                error: "Analysis was cancelled".to_string(),
                kind: NoticeKind::Cancelled,
            },
        }
    }
}

/// Validates `input`, then probes and analyzes it with retries.
///
/// Validation failures return immediately without network activity, retries
/// or error log entries. Each attempt probes reachability (fail-open) and
/// then calls the analyzer; retriable failures are retried per the context's
/// policy. A terminal failure is mirrored into the error log and returned
/// unchanged inside `ProfileError::Operation`.
///
/// # Errors
///
/// See [`ProfileError`].
pub async fn analyze_profile(
    ctx: &ProfileContext,
    input: &str,
    analysis_context: Option<&str>,
    cancel: &CancellationToken,
) -> Result<ProfileReport, ProfileError> {
    let url = validate_url(input)?;
    let platform = Platform::from_url(&url);
    info!("Analyzing {platform} profile {url}");

    let mut attempts = 0u32;
    let result = with_retry_cancellable(
        &ctx.retry_policy,
        cancel,
        || {
            attempts += 1;
            let url = url.as_str();
            async move {
                let accessibility = ctx.prober.probe(url).await;
                if !accessibility.accessible {
                    warn!(
                        "{url} answered {} through the proxy",
                        accessibility
                            .status
                            .map_or_else(|| "an error".to_string(), |s| s.to_string())
                    );
                }
                let scores = ctx
                    .analyzer
                    .analyze(url, analysis_context)
                    .await
                    .with_context(|| format!("Analysis of {url} failed"))?;
                Ok::<_, anyhow::Error>((accessibility, scores))
            }
        },
        |e: &anyhow::Error| {
            let retriable = is_retriable_error(e);
            if retriable {
                debug!("Retriable failure for {url}: {e:#}");
            } else {
                debug!("Not retrying {url}: {e:#}");
            }
            retriable
        },
    )
    .await;

    let retry_count = attempts.saturating_sub(1);

    match result {
        Ok((accessibility, scores)) => Ok(ProfileReport {
            normalized_url: url,
            platform,
            accessibility,
            scores,
            retry_count,
        }),
        Err(RetryError::Failed(e)) => {
            error!("Error analyzing {url} after {attempts} attempt(s): {e:#}");
            ctx.error_log.track(
                ErrorEntry::from_error(&e, &ctx.user_agent)
                    .with_context(ERROR_LOG_CONTEXT)
                    .with_url(url.as_str()),
            );
            Err(ProfileError::Operation(e))
        }
        Err(RetryError::Cancelled) => {
            warn!("Analysis of {url} cancelled after {attempts} attempt(s)");
            Err(ProfileError::Cancelled)
        }
    }
}
