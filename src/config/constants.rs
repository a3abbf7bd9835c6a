//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the application,
//! including timeouts, size limits, retry parameters and the domain allow-list.

use std::time::Duration;

/// Maximum URL length (2048 characters).
/// This matches common browser and server limits (e.g., IE, Apache, Nginx default limits).
pub const MAX_URL_LENGTH: usize = 2048;

// Accessibility probe
/// Public CORS proxy used for reachability probes.
/// The probe hits `<base>/raw?url=<encoded target>` and the proxy forwards the target status.
pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win";
/// Client-side deadline for a single reachability probe
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag. The value is also
/// recorded in every error log entry.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Retry strategy
/// Number of retries after the initial attempt (3 = 4 attempts in total)
pub const RETRY_MAX_RETRIES: u32 = 3;
/// Delay before the first retry in milliseconds; each later retry doubles it
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

// Error log
/// Maximum number of entries kept in the error log (oldest evicted first)
pub const ERROR_LOG_CAPACITY: usize = 50;
/// Default location of the persisted error log
pub const DEFAULT_ERROR_LOG_PATH: &str = "./profile_check_errors.json";
/// Maximum error message length in characters (2000 chars)
/// Error messages longer than this are truncated with a note about the original length
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

// Mock analysis
/// Simulated latency of the mock analyzer
pub const ANALYSIS_LATENCY_MS: u64 = 1500;
