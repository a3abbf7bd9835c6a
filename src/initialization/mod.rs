//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client for reachability probes
//! - Profile analysis context (prober, analyzer, error log, retry policy)
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::sync::Arc;

use crate::accessibility::AccessibilityProber;
use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::error_log::FileErrorLog;
use crate::pipeline::ProfileContext;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Builds the analysis context described by `config`.
///
/// Uses the mock analyzer and a file-backed error log at `config.error_log`.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the HTTP client cannot be built.
pub fn init_profile_context(config: &Config) -> Result<ProfileContext, InitializationError> {
    let client = init_client(config)?;
    let prober = AccessibilityProber::new(client, config.probe_config());
    Ok(ProfileContext::new(
        prober,
        Arc::new(config.mock_analyzer()),
        Arc::new(FileErrorLog::new(&config.error_log)),
        config.retry_policy(),
        config.user_agent.clone(),
    ))
}
