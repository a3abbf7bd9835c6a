//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, retry defaults)
//! - CLI option types and parsing
//! - Configuration validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, Config, ConfigError, ErrorsAction, LogFormat, LogLevel};
