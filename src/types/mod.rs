//! Type definitions for the auth session manager
//!
//! Identifiers for type safety, the user profile, exchange payloads and the
//! session snapshot published to consumers.

pub mod exchange;
pub mod identifiers;
pub mod session;
pub mod user;

pub use exchange::{ExchangeOutcome, ExchangeResult, RevokeRequest};
pub use identifiers::{AccessToken, ClientId, CsrfState};
pub use session::{AuthSnapshot, SignInOutcome};
pub use user::User;
pub(crate) use user::UsersResponse;
