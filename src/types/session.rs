//! Session state published to consumers

use super::identifiers::AccessToken;
use super::user::User;

/// Snapshot of the manager's session and in-flight flags
///
/// `user` and `token` are always written together: either both are set or
/// both are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Signed-in user
    pub user: Option<User>,
    /// Access token of the current session
    pub token: Option<AccessToken>,
    /// A sign-in is in flight
    pub is_logging_in: bool,
    /// A sign-out is in flight
    pub is_logging_out: bool,
}

impl AuthSnapshot {
    /// Whether a session is established
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Whether either operation is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.is_logging_in || self.is_logging_out
    }
}

/// Non-error result of a sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Session established
    SignedIn(User),
    /// User dismissed the authorization flow
    Cancelled,
    /// User declined the consent screen
    Denied,
    /// Exchange reported failure
    Failed,
}

impl SignInOutcome {
    /// The user, if a session was established
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}
