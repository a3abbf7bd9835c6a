//! Shared helpers.
//!
//! - Error message sanitization for the error log

pub mod sanitize;
