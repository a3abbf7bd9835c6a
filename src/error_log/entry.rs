//! Error log record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// One tracked error.
///
/// Serialized field names follow the persisted layout:
/// `{timestamp, message, stack, context, userAgent, url}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Cause chain below the top-level message, one cause per line
    pub stack: Option<String>,
    /// Caller-supplied label of where the error was tracked
    pub context: Option<String>,
    pub user_agent: String,
    /// URL being processed when the error occurred
    pub url: Option<String>,
}

impl ErrorEntry {
    /// Builds an entry from a plain message.
    pub fn new(message: &str, user_agent: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            message: sanitize_and_truncate_error_message(message),
            stack: None,
            context: None,
            user_agent: user_agent.to_string(),
            url: None,
        }
    }

    /// Builds an entry from an error and its cause chain.
    pub fn from_error(error: &anyhow::Error, user_agent: &str) -> Self {
        let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
        let mut entry = Self::new(&error.to_string(), user_agent);
        if !causes.is_empty() {
            entry.stack = Some(sanitize_and_truncate_error_message(&causes.join("\n")));
        }
        entry
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
