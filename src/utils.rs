//! String helpers for provider responses
//!
//! Provider error bodies end up in error messages and logs. These helpers cap
//! their size without splitting a multi-byte character.

/// Maximum bytes of a response body kept in an error message
pub const MAX_ERROR_BODY_BYTES: usize = 512;

/// Safely truncate a string at a UTF-8 character boundary.
///
/// Returns a slice of at most `max_bytes` bytes.
///
/// # Example
/// ```
/// use auth_session::utils::safe_truncate;
///
/// // 'é' is 2 bytes - truncating at byte 4 would cut it in half
/// assert_eq!(safe_truncate("Café", 4), "Caf");
/// ```
#[inline]
#[must_use]
pub fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut boundary = max_bytes;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    &s[..boundary]
}

/// Trim a response body for inclusion in an error, appending "..." if cut.
#[must_use]
pub fn error_body(body: &str) -> String {
    let body = body.trim();
    let truncated = safe_truncate(body, MAX_ERROR_BODY_BYTES);
    if truncated.len() < body.len() {
        format!("{truncated}...")
    } else {
        truncated.to_string()
    }
}
