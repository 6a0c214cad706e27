//! Default capability implementations
//!
//! reqwest-backed implementations of the API client and revocation
//! capabilities, plus a browser/terminal authorization exchange. Any of them
//! can be swapped for a custom implementation of the traits in
//! [`callbacks`](crate::callbacks).

pub mod browser;
pub mod http;
pub mod revoke;

pub use browser::{BrowserExchange, parse_redirect};
pub use http::ReqwestApiClient;
pub use revoke::{DEFAULT_REVOKE_TIMEOUT, HttpTokenRevoker};
