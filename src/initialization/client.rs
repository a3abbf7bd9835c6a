//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client used for reachability probes.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Request timeout equal to the probe deadline
///
/// The probe also enforces its own deadline, so the client timeout only
/// backs it up for callers that use the client directly.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_millis(config.probe_timeout_ms))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
