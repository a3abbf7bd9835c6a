//! profile_check library: validation, reachability probing and retried
//! analysis of professional-profile URLs.
//!
//! The two reusable building blocks are [`validate_url`], which normalizes a
//! raw user-typed string against a small domain allow-list, and the retry
//! helpers in [`retry`], which run an async operation with exponential
//! backoff. [`analyze_profile`] wires them together with a fail-open
//! reachability probe, a pluggable [`Analyzer`](analysis::Analyzer) and a
//! capped [`ErrorLog`](error_log::ErrorLog).
//!
//! # Example
//!
//! ```no_run
//! use profile_check::initialization::init_profile_context;
//! use profile_check::{analyze_profile, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = init_profile_context(&Config::default())?;
//! let cancel = CancellationToken::new();
//! let report = analyze_profile(&ctx, "github.com/octocat", None, &cancel).await?;
//! println!("{} scored {}", report.normalized_url, report.scores.overall);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Probing and analysis require a Tokio runtime. Validation is synchronous.

pub mod accessibility;
pub mod analysis;
pub mod config;
pub mod error_handling;
pub mod error_log;
pub mod initialization;
pub mod pipeline;
pub mod retry;
mod utils;
pub mod validation;

// Re-export public API
pub use accessibility::{test_url_accessibility, AccessibilityResult};
pub use config::{Cli, Command, Config, LogFormat, LogLevel};
pub use pipeline::{analyze_profile, ProfileContext, ProfileError, ProfileReport};
pub use retry::{with_retry, with_retry_cancellable, with_retry_if, RetryError, RetryPolicy};
pub use validation::{validate_url, ValidationError, ValidationResult};
