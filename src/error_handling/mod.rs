//! Error handling.
//!
//! This module provides:
//! - Startup error types
//! - The `{error, type}` notice handed to a UI error surface
//! - Retriability classification for the analysis retry loop
//!
//! Errors are categorized into:
//! - **Validation**: input rejected locally, returned as a value, never retried
//! - **Network**: anything thrown inside the retry loop, retried while retriable
//! - **Cancelled**: the caller aborted a pending retry sequence

mod categorization;
mod types;

// Re-export public API
pub use categorization::is_retriable_error;
pub use types::{ErrorNotice, InitializationError, NoticeKind};
