//! Profile URL validation and normalization.
//!
//! Turns a raw, user-typed string into a normalized `http(s)` URL or a
//! human-readable error. Validation is purely local: it never touches the
//! network and its failures are never retried.

mod platform;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::config::MAX_URL_LENGTH;

pub use platform::{allowed_domains, Platform};

/// Reasons a raw input is not accepted as a profile URL.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input does not parse as a URL even after scheme normalization,
    /// has no host, or exceeds `MAX_URL_LENGTH`.
    #[error("Invalid URL format. Please include https:// or a valid domain")]
    InvalidFormat,

    /// Host is neither on the allow-list nor a plausible generic domain.
    #[error("Please enter a valid GitHub, LinkedIn, or portfolio URL")]
    UnsupportedDomain,
}

/// Validates and normalizes a profile URL.
///
/// Trims whitespace and prepends `https://` when no `http://`/`https://`
/// scheme is present, then parses the result. Hosts containing an allow-list
/// domain are accepted, as is any other host containing a dot; dotless
/// off-list hosts (`localhost`, IPv6 literals) are rejected.
///
/// Host matching is case-insensitive: the URL parser lowercases domain hosts.
/// The returned string keeps the caller's casing.
///
/// # Errors
///
/// `ValidationError::InvalidFormat` or `ValidationError::UnsupportedDomain`.
///
/// # Examples
///
/// ```
/// use profile_check::validation::validate_url;
///
/// assert_eq!(
///     validate_url("  GitHub.com/octocat  ").as_deref(),
///     Ok("https://GitHub.com/octocat")
/// );
/// assert!(validate_url("https://localhost").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.len() > MAX_URL_LENGTH {
        debug!(
            "Rejecting URL exceeding maximum length ({} > {})",
            trimmed.len(),
            MAX_URL_LENGTH
        );
        return Err(ValidationError::InvalidFormat);
    }

    let normalized = if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    };

    // The prefix can push an input that was just under the limit over it
    if normalized.len() > MAX_URL_LENGTH {
        return Err(ValidationError::InvalidFormat);
    }

    let parsed = match url::Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Rejecting unparseable URL {normalized:?}: {e}");
            return Err(ValidationError::InvalidFormat);
        }
    };
    let Some(host) = parsed.host_str() else {
        return Err(ValidationError::InvalidFormat);
    };

    if Platform::from_host(host) == Platform::Other && !host.contains('.') {
        debug!("Rejecting URL with unsupported host {host:?}");
        return Err(ValidationError::UnsupportedDomain);
    }

    Ok(normalized)
}

/// Serializable outcome of a validation call.
///
/// Serializes as `{isValid, error?, normalizedUrl?}`. Fields are private and
/// the only constructor is `From<Result<..>>`, so `normalized_url` is present
/// exactly when the result is valid and `error` exactly when it is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized_url: Option<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn normalized_url(&self) -> Option<&str> {
        self.normalized_url.as_deref()
    }
}

impl From<Result<String, ValidationError>> for ValidationResult {
    fn from(result: Result<String, ValidationError>) -> Self {
        match result {
            Ok(url) => Self {
                is_valid: true,
                error: None,
                normalized_url: Some(url),
            },
            Err(e) => Self {
                is_valid: false,
                error: Some(e.to_string()),
                normalized_url: None,
            },
        }
    }
}
