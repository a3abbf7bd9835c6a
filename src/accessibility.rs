//! Best-effort reachability probing through a public CORS proxy.
//!
//! Probes are fail-open: a probe that cannot complete (timeout, connection
//! failure, proxy failure) reports the target as accessible. Only a real
//! non-2xx status forwarded by the proxy reports it as inaccessible. Many
//! profile sites block cross-origin probing outright, so an unverifiable
//! probe is not evidence of a dead URL.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::Serialize;

use crate::config::{DEFAULT_PROXY_URL, PROBE_TIMEOUT};

/// Outcome of a single reachability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessibilityResult {
    /// Whether the target is considered reachable
    pub accessible: bool,
    /// Status forwarded by the proxy; absent when the probe did not complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl AccessibilityResult {
    /// Result used whenever the probe cannot be completed.
    pub fn fail_open() -> Self {
        Self {
            accessible: true,
            status: None,
        }
    }
}

/// Proxy and deadline used by reachability probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Proxy base URL without trailing slash; the probe requests `<proxy_url>/raw?url=...`
    pub proxy_url: String,
    /// Deadline for the whole probe
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            timeout: PROBE_TIMEOUT,
        }
    }
}

/// Builds the proxy request URL for `target`.
///
/// # Errors
///
/// Returns a `url::ParseError` if the configured proxy base is not a valid URL.
pub fn proxy_request_url(proxy_url: &str, target: &str) -> Result<url::Url, url::ParseError> {
    url::Url::parse_with_params(
        &format!("{}/raw", proxy_url.trim_end_matches('/')),
        &[("url", target)],
    )
}

/// Probes `url` through the configured proxy.
///
/// Issues `GET <proxy>/raw?url=<encoded url>` and waits at most
/// `config.timeout`; the in-flight request is dropped when the deadline passes.
/// Never fails and never retries: see the module docs for the fail-open policy.
pub async fn test_url_accessibility(
    client: &reqwest::Client,
    config: &ProbeConfig,
    url: &str,
) -> AccessibilityResult {
    let request_url = match proxy_request_url(&config.proxy_url, url) {
        Ok(u) => u,
        Err(e) => {
            debug!("Cannot build proxy URL from {:?}: {e}", config.proxy_url);
            return AccessibilityResult::fail_open();
        }
    };

    match tokio::time::timeout(config.timeout, client.get(request_url).send()).await {
        Ok(Ok(response)) => {
            let status = response.status();
            debug!("Probe for {url} returned {status}");
            AccessibilityResult {
                accessible: status.is_success(),
                status: Some(status.as_u16()),
            }
        }
        Ok(Err(e)) => {
            debug!("Probe for {url} failed, assuming accessible: {e}");
            AccessibilityResult::fail_open()
        }
        Err(_) => {
            debug!(
                "Probe for {url} timed out after {}ms, assuming accessible",
                config.timeout.as_millis()
            );
            AccessibilityResult::fail_open()
        }
    }
}

/// Shared HTTP client bound to a probe configuration.
#[derive(Debug, Clone)]
pub struct AccessibilityProber {
    client: Arc<reqwest::Client>,
    config: ProbeConfig,
}

impl AccessibilityProber {
    pub fn new(client: Arc<reqwest::Client>, config: ProbeConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub async fn probe(&self, url: &str) -> AccessibilityResult {
        test_url_accessibility(&self.client, &self.config, url).await
    }
}
