//! Authorization request construction for the implicit grant

use crate::config::AuthConfig;
use crate::types::CsrfState;

/// Implicit grant: token returned directly in the redirect
const RESPONSE_TYPE: &str = "token";

/// Build the authorization URL for one sign-in attempt
pub(crate) fn build_authorization_url(config: &AuthConfig, state: &CsrfState) -> String {
    let scope = config.scope_string();
    let force_verify = if config.force_verify { "true" } else { "false" };

    let params = [
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("response_type", RESPONSE_TYPE),
        ("scope", scope.as_str()),
        ("force_verify", force_verify),
        ("state", state.as_str()),
    ];

    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding(v)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if config.authorization_endpoint.contains('?') {
        '&'
    } else {
        '?'
    };
    format!("{}{separator}{query}", config.authorization_endpoint)
}

/// URL encode a string for OAuth parameters.
/// Preserves unreserved characters per RFC 3986.
fn urlencoding(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                const HEX: &[u8; 16] = b"0123456789ABCDEF";
                result.push('%');
                result.push(HEX[usize::from(byte >> 4)] as char);
                result.push(HEX[usize::from(byte & 0x0F)] as char);
            }
        }
    }
    result
}
