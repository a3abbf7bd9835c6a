//! Cleanup of error text before it is written to the error log.
//!
//! Strips control characters and caps the length so a single pathological
//! error cannot bloat the persisted log.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Removes control characters except newline, tab and carriage return.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}

/// Sanitizes `message` and truncates it to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// Truncated messages end with a note carrying the original length. Truncation
/// counts characters, so multi-byte text is never split mid-character.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let len = sanitized.chars().count();
    if len <= MAX_ERROR_MESSAGE_LENGTH {
        return sanitized;
    }

    // Leave room for the suffix
    let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
    let head: String = sanitized.chars().take(keep).collect();
    format!("{head}... (truncated, original length: {len} chars)")
}
