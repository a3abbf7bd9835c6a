//! Error type definitions.
//!
//! This module defines the startup errors and the payload handed to a UI error surface.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Category of a failure shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Input rejected locally, shown inline without any network activity
    Validation,
    /// Operation failed after the retry budget was spent
    Network,
    /// Caller aborted the operation
    Cancelled,
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Validation => "validation",
            NoticeKind::Network => "network",
            NoticeKind::Cancelled => "cancelled",
        }
    }
}

/// Payload for a UI error display: `{error, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub error: String,
    #[serde(rename = "type")]
    pub kind: NoticeKind,
}
