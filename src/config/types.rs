//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::accessibility::ProbeConfig;
use crate::analysis::MockAnalyzer;
use crate::config::constants::{
    ANALYSIS_LATENCY_MS, DEFAULT_ERROR_LOG_PATH, DEFAULT_PROXY_URL, DEFAULT_USER_AGENT,
    PROBE_TIMEOUT, RETRY_BASE_DELAY_MS, RETRY_MAX_RETRIES,
};
use crate::retry::RetryPolicy;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line interface: shared options plus the command to run.
#[derive(Debug, Parser)]
#[command(name = "profile_check", version, about)]
pub struct Cli {
    /// Options shared by every command
    #[command(flatten)]
    pub config: Config,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Commands understood by the CLI.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate one or more URLs and print a result line for each
    Validate {
        /// Raw URLs as a user would type them
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Validate a URL and probe its reachability through the proxy
    Probe {
        /// Raw URL as a user would type it
        url: String,
    },
    /// Run the full validation, probe and analysis pipeline
    Analyze {
        /// Raw URL as a user would type it
        url: String,

        /// Free-form context passed to the analyzer (e.g. a target role)
        #[arg(long)]
        context: Option<String>,
    },
    /// Inspect or clear the persisted error log
    Errors {
        #[command(subcommand)]
        action: ErrorsAction,
    },
}

/// Error log maintenance actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ErrorsAction {
    /// Print every stored entry as JSON
    List,
    /// Remove every stored entry
    Clear,
}

/// Library configuration.
///
/// Can be constructed programmatically via `Default` or parsed from the
/// command line as part of [`Cli`].
///
/// # Examples
///
/// ```no_run
/// use profile_check::Config;
///
/// let config = Config {
///     max_retries: 1,
///     base_delay_ms: 250,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Path of the persisted error log (JSON array)
    #[arg(long, default_value = DEFAULT_ERROR_LOG_PATH, global = true)]
    pub error_log: PathBuf,

    /// Base URL of the CORS proxy used for reachability probes
    #[arg(long, default_value = DEFAULT_PROXY_URL, global = true)]
    pub proxy_url: String,

    /// Reachability probe deadline in milliseconds
    #[arg(long, default_value_t = PROBE_TIMEOUT.as_millis() as u64, global = true)]
    pub probe_timeout_ms: u64,

    /// Retries after the initial attempt
    #[arg(long, default_value_t = RETRY_MAX_RETRIES, global = true)]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds (doubles on each retry)
    #[arg(long, default_value_t = RETRY_BASE_DELAY_MS, global = true)]
    pub base_delay_ms: u64,

    /// Upper bound on a single retry delay in milliseconds
    #[arg(long, global = true)]
    pub max_delay_ms: Option<u64>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Simulated latency of the analyzer in milliseconds
    #[arg(long, default_value_t = ANALYSIS_LATENCY_MS, global = true)]
    pub analysis_latency_ms: u64,

    /// Probability (0.0-1.0) that a single analysis attempt fails transiently
    #[arg(long, default_value_t = 0.0, global = true)]
    pub failure_rate: f64,

    /// Seed for the analyzer's random scores (random when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            error_log: PathBuf::from(DEFAULT_ERROR_LOG_PATH),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            probe_timeout_ms: PROBE_TIMEOUT.as_millis() as u64,
            max_retries: RETRY_MAX_RETRIES,
            base_delay_ms: RETRY_BASE_DELAY_MS,
            max_delay_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            analysis_latency_ms: ANALYSIS_LATENCY_MS,
            failure_rate: 0.0,
            seed: None,
        }
    }
}

/// A configuration value that cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for `{field}`: {message}")]
pub struct ConfigError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong and what is expected instead
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Config {
    /// Checks option values that clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with an actionable message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::new(
                "probe_timeout_ms",
                "must be greater than 0",
            ));
        }
        if let Some(max_delay) = self.max_delay_ms {
            if max_delay < self.base_delay_ms {
                return Err(ConfigError::new(
                    "max_delay_ms",
                    format!(
                        "must be at least base_delay_ms ({}), got {}",
                        self.base_delay_ms, max_delay
                    ),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ConfigError::new(
                "failure_rate",
                format!("must be between 0.0 and 1.0, got {}", self.failure_rate),
            ));
        }
        if self.proxy_url.trim().is_empty() {
            return Err(ConfigError::new("proxy_url", "must not be empty"));
        }
        if let Err(e) = url::Url::parse(&self.proxy_url) {
            return Err(ConfigError::new(
                "proxy_url",
                format!("must be an absolute URL such as {DEFAULT_PROXY_URL} ({e})"),
            ));
        }
        Ok(())
    }

    /// Retry policy described by the retry options.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: self.max_delay_ms.map(Duration::from_millis),
        }
    }

    /// Probe settings described by the proxy options.
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            proxy_url: self.proxy_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(self.probe_timeout_ms),
        }
    }

    /// Mock analyzer configured from the analysis options.
    pub fn mock_analyzer(&self) -> MockAnalyzer {
        MockAnalyzer::new(Duration::from_millis(self.analysis_latency_ms))
            .with_failure_rate(self.failure_rate)
            .with_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_probe_timeout_rejected() {
        let config = Config {
            probe_timeout_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "probe_timeout_ms");
        assert!(err.message.contains("greater than 0"));
    }

    #[test]
    fn test_max_delay_below_base_rejected() {
        let config = Config {
            base_delay_ms: 1000,
            max_delay_ms: Some(500),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "max_delay_ms");
        assert!(err.message.contains("1000"));
    }

    #[test]
    fn test_failure_rate_out_of_range_rejected() {
        let config = Config {
            failure_rate: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "failure_rate");
    }

    #[test]
    fn test_relative_proxy_url_rejected() {
        let config = Config {
            proxy_url: "allorigins.win".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "proxy_url");
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = Config {
            max_retries: 2,
            base_delay_ms: 100,
            max_delay_ms: Some(150),
            ..Default::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.base_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Some(Duration::from_millis(150)));
    }

    #[test]
    fn test_probe_config_strips_trailing_slash() {
        let config = Config {
            proxy_url: "https://proxy.example/".to_string(),
            probe_timeout_ms: 250,
            ..Default::default()
        };
        let probe = config.probe_config();
        assert_eq!(probe.proxy_url, "https://proxy.example");
        assert_eq!(probe.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
    }
}
