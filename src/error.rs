//! Error types for the auth session manager

use thiserror::Error;

/// Why a sign-in attempt failed.
///
/// Callers only ever see [`AuthSessionError::SignInFailed`]; the kind is kept
/// so UI code can branch on it, while the underlying cause is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFailure {
    /// Returned `state` did not match the nonce sent with the request
    InvalidState,
    /// Provider reported an error other than `access_denied`
    Provider,
    /// Exchange succeeded but carried no access token
    MissingToken,
    /// The authorization exchange itself errored
    Exchange,
    /// The bearer header could not be injected into the API client
    Header,
    /// Profile request or profile decoding failed after token acquisition
    ProfileFetch,
}

impl std::fmt::Display for SignInFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::InvalidState => "invalid state",
            Self::Provider => "provider error",
            Self::MissingToken => "missing access token",
            Self::Exchange => "authorization exchange failed",
            Self::Header => "could not set authorization header",
            Self::ProfileFetch => "profile fetch failed",
        };
        f.write_str(label)
    }
}

/// Main error type for the auth session manager
#[derive(Error, Debug)]
pub enum AuthSessionError {
    /// Provider answered with `access_denied`
    #[error("Authorization denied by user")]
    AuthorizationDenied,

    /// CSRF state returned by the provider does not match the request
    #[error("Invalid state value")]
    InvalidState,

    /// Profile could not be fetched or decoded
    #[error("Profile fetch failed: {0}")]
    ProfileFetch(String),

    /// Opaque sign-in failure surfaced to callers
    #[error("Failed to sign in ({kind})")]
    SignInFailed {
        /// Failure category
        kind: SignInFailure,
    },

    /// Token revocation failed (never propagated by the manager)
    #[error("Token revocation failed: {0}")]
    RevocationFailed(String),

    /// Authorization exchange could not be performed
    #[error("Authorization exchange failed: {0}")]
    Exchange(String),

    /// Non-success HTTP status from a remote endpoint
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Header name or value rejected by the API client
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Browser could not be opened
    #[error("Could not open browser: {0}")]
    BrowserOpen(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Result type alias for auth session operations
pub type Result<T> = std::result::Result<T, AuthSessionError>;

impl AuthSessionError {
    /// Create a sign-in failure of the given kind
    #[must_use]
    pub fn sign_in_failed(kind: SignInFailure) -> Self {
        Self::SignInFailed { kind }
    }

    /// Create a profile fetch error
    pub fn profile_fetch(msg: impl Into<String>) -> Self {
        Self::ProfileFetch(msg.into())
    }

    /// Create a revocation error
    pub fn revocation(msg: impl Into<String>) -> Self {
        Self::RevocationFailed(msg.into())
    }

    /// Create an exchange error
    pub fn exchange(msg: impl Into<String>) -> Self {
        Self::Exchange(msg.into())
    }

    /// Create an HTTP status error
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: msg.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Failure kind, if this is a sign-in failure
    #[must_use]
    pub fn sign_in_failure(&self) -> Option<SignInFailure> {
        match self {
            Self::SignInFailed { kind } => Some(*kind),
            _ => None,
        }
    }
}
