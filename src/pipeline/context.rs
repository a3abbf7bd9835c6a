//! Shared resources for profile analysis.

use std::sync::Arc;

use crate::accessibility::AccessibilityProber;
use crate::analysis::Analyzer;
use crate::error_log::ErrorLog;
use crate::retry::RetryPolicy;

/// Everything `analyze_profile` needs, bundled so it can be shared across calls.
#[derive(Clone)]
pub struct ProfileContext {
    /// Reachability prober (HTTP client + proxy settings)
    pub prober: AccessibilityProber,
    /// Analysis collaborator
    pub analyzer: Arc<dyn Analyzer>,
    /// Sink for errors that survive the retry loop
    pub error_log: Arc<dyn ErrorLog>,
    /// Retry budget and backoff for each analysis
    pub retry_policy: RetryPolicy,
    /// User agent recorded in error log entries
    pub user_agent: String,
}

impl ProfileContext {
    pub fn new(
        prober: AccessibilityProber,
        analyzer: Arc<dyn Analyzer>,
        error_log: Arc<dyn ErrorLog>,
        retry_policy: RetryPolicy,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            prober,
            analyzer,
            error_log,
            retry_policy,
            user_agent: user_agent.into(),
        }
    }
}

impl std::fmt::Debug for ProfileContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileContext")
            .field("prober", &self.prober)
            .field("retry_policy", &self.retry_policy)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
