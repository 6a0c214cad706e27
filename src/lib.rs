//! # auth-session
//!
//! Client-side OAuth2 implicit-grant session manager.
//! Async/await, strong typing, tokio-based.
//!
//! ## Quick Start
//!
//! ```no_run
//! use auth_session::{AuthConfig, AuthSessionManager, SignInOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = AuthSessionManager::new(AuthConfig::default())?;
//!
//!     match manager.sign_in().await? {
//!         SignInOutcome::SignedIn(user) => println!("Hello, {}", user.display_name),
//!         SignInOutcome::Cancelled => println!("Cancelled"),
//!         SignInOutcome::Denied => println!("Access denied"),
//!         SignInOutcome::Failed => println!("Authorization did not complete"),
//!     }
//!
//!     manager.sign_out().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom collaborators
//!
//! The browser, the API client and the revocation endpoint are injected
//! capabilities (see [`callbacks`]). Swap any of them through the builder:
//!
//! ```no_run
//! # use auth_session::{AuthSessionManager, ReqwestApiClient};
//! # use std::sync::Arc;
//! # fn example() -> auth_session::Result<()> {
//! let api = Arc::new(ReqwestApiClient::new("https://api.twitch.tv/helix")?);
//! let manager = AuthSessionManager::builder()
//!     .api_client(api.clone())
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Observing the session
//!
//! [`AuthSessionManager::subscribe`] returns a `tokio::sync::watch` receiver
//! and [`AuthSessionManager::changes`] a `Stream` of [`AuthSnapshot`]s carrying
//! the user and the `is_logging_in`/`is_logging_out` flags.
//!
//! ## Architecture
//!
//! - [`auth`]: the session manager and authorization request construction
//! - [`callbacks`]: capability traits for external collaborators
//! - [`store`]: observable session store
//! - [`transport`]: reqwest and browser implementations of the capabilities
//! - [`config`]: provider configuration
//! - [`types`]: identifiers, user profile, exchange payloads
//! - [`error`]: error types and handling
//!
//! ## Logging
//!
//! This crate uses [`tracing`](https://crates.io/crates/tracing) for structured logging.
//! Tracing events are always emitted but are zero-cost when no subscriber is attached.
//! Access tokens are never logged.
//!
//! ```rust,ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! ## Error Handling
//!
//! Sign-in failures are normalized to [`AuthSessionError::SignInFailed`];
//! sign-out never fails.
//!
//! ```no_run
//! # use auth_session::{AuthSessionManager, AuthSessionError, SignInFailure};
//! # async fn example(manager: &AuthSessionManager) {
//! match manager.sign_in().await {
//!     Ok(outcome) => println!("{outcome:?}"),
//!     Err(e) if e.sign_in_failure() == Some(SignInFailure::InvalidState) => {
//!         eprintln!("Possible forged redirect");
//!     }
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod callbacks;
pub mod config;
pub mod error;
pub mod store;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use auth::{AuthSessionManager, AuthSessionManagerBuilder};
pub use callbacks::{
    ApiClient, AuthorizationExchange, FnAuthorizationExchange, FnTokenRevoker, NoopRevoker,
    RandomStateGenerator, StateGenerator, TokenRevoker,
};
pub use config::AuthConfig;
pub use error::{AuthSessionError, Result, SignInFailure};
pub use store::SessionStore;
pub use transport::{BrowserExchange, HttpTokenRevoker, ReqwestApiClient};
pub use types::{
    AccessToken, AuthSnapshot, ClientId, CsrfState, ExchangeOutcome, ExchangeResult,
    RevokeRequest, SignInOutcome, User,
};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
