//! OAuth2 implicit-grant session management
//!
//! # Overview
//!
//! [`AuthSessionManager`] drives one session through the implicit grant:
//!
//! 1. Generate a fresh CSRF state nonce
//! 2. Build the authorization URL (`response_type=token`, scopes, `force_verify`, `state`)
//! 3. Hand the URL to the [`AuthorizationExchange`](crate::callbacks::AuthorizationExchange)
//! 4. Check the returned `state` against the nonce from step 1
//! 5. Inject `Authorization: Bearer <token>` and fetch the user profile
//! 6. Publish user and token together
//!
//! Sign-out revokes the token on a best-effort basis and always clears the
//! local session and the bearer header.
//!
//! # Example
//!
//! ```no_run
//! use auth_session::auth::AuthSessionManager;
//! use auth_session::{AuthConfig, SignInOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = AuthSessionManager::new(AuthConfig::from_env()?)?;
//!
//!     if let SignInOutcome::SignedIn(user) = manager.sign_in().await? {
//!         println!("Signed in as {}", user.display_name);
//!     }
//!
//!     manager.sign_out().await;
//!     Ok(())
//! }
//! ```
//!
//! # Security
//!
//! - The `state` nonce is fresh per attempt and compared exactly
//! - A mismatch fails before any header or session mutation
//! - Access tokens are redacted from `Debug` output and logs

mod guard;
mod manager;
mod request;

pub use manager::{AuthSessionManager, AuthSessionManagerBuilder, CLIENT_ID_HEADER};

/// Header carrying the bearer token
pub const AUTHORIZATION_HEADER: &str = guard::AUTHORIZATION_HEADER;
