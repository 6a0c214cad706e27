//! Demo settings read from the environment

/// Whether to launch the system browser automatically
pub fn auto_open_browser() -> bool {
    std::env::var("SIGNIN_DEMO_NO_BROWSER").is_err()
}

/// Whether to sign out (and revoke the token) before exiting
pub fn sign_out_on_exit() -> bool {
    std::env::var("SIGNIN_DEMO_KEEP_SESSION")
        .map(|v| !(v == "1" || v.eq_ignore_ascii_case("true")))
        .unwrap_or(true)
}

/// Check if NO_COLOR environment variable is set
pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok()
}
