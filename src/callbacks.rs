//! Capability traits for the manager's external collaborators.
//!
//! The manager never talks to a browser or the network directly. It drives
//! four injected capabilities:
//!
//! - [`AuthorizationExchange`]: performs the redirect dance for a URL
//! - [`ApiClient`]: holds default headers and performs GET requests
//! - [`TokenRevoker`]: invalidates a token at the provider
//! - [`StateGenerator`]: produces a fresh CSRF nonce
//!
//! Users can implement these traits on their own types, or wrap closures
//! with [`FnAuthorizationExchange`] and [`FnTokenRevoker`].
//!
//! # Example: a scripted exchange
//!
//! ```no_run
//! use auth_session::callbacks::AuthorizationExchange;
//! use auth_session::types::ExchangeResult;
//! use auth_session::Result;
//! use async_trait::async_trait;
//!
//! struct AlwaysCancelled;
//!
//! #[async_trait]
//! impl AuthorizationExchange for AlwaysCancelled {
//!     async fn exchange(&self, _auth_url: &str) -> Result<ExchangeResult> {
//!         Ok(ExchangeResult::cancelled())
//!     }
//! }
//! ```

use async_trait::async_trait;
use futures::future::BoxFuture;
use rand::Rng;
use rand::distr::Alphanumeric;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{CsrfState, ExchangeResult, RevokeRequest};

/// Length of generated CSRF nonces
pub const DEFAULT_STATE_LENGTH: usize = 30;

// ============================================================================
// Authorization exchange
// ============================================================================

/// Performs the browser redirect flow for an authorization URL.
#[async_trait]
pub trait AuthorizationExchange: Send + Sync {
    /// Open `auth_url`, wait for the provider redirect and report the result.
    ///
    /// # Errors
    ///
    /// Implementations return an error only when the exchange could not be
    /// attempted at all; user cancellation is [`ExchangeResult::cancelled`].
    async fn exchange(&self, auth_url: &str) -> Result<ExchangeResult>;
}

#[async_trait]
impl<T: AuthorizationExchange + ?Sized> AuthorizationExchange for Arc<T> {
    async fn exchange(&self, auth_url: &str) -> Result<ExchangeResult> {
        (**self).exchange(auth_url).await
    }
}

#[async_trait]
impl AuthorizationExchange for Box<dyn AuthorizationExchange> {
    async fn exchange(&self, auth_url: &str) -> Result<ExchangeResult> {
        (**self).exchange(auth_url).await
    }
}

// ============================================================================
// API client
// ============================================================================

/// Outbound API client with mutable default headers.
///
/// Header operations are synchronous: they touch a local header map, never
/// the network.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Set a default header sent with every request
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` if the name or value is not a valid header.
    fn set_header(&self, name: &str, value: &str) -> Result<()>;

    /// Remove a default header; no-op if absent
    fn remove_header(&self, name: &str);

    /// Current value of a default header
    fn header(&self, name: &str) -> Option<String>;

    /// GET `path` relative to the client's base URL and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or invalid JSON.
    async fn get(&self, path: &str) -> Result<serde_json::Value>;
}

#[async_trait]
impl<T: ApiClient + ?Sized> ApiClient for Arc<T> {
    fn set_header(&self, name: &str, value: &str) -> Result<()> {
        (**self).set_header(name, value)
    }

    fn remove_header(&self, name: &str) {
        (**self).remove_header(name);
    }

    fn header(&self, name: &str) -> Option<String> {
        (**self).header(name)
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        (**self).get(path).await
    }
}

// ============================================================================
// Token revocation
// ============================================================================

/// Invalidates a token at the provider.
#[async_trait]
pub trait TokenRevoker: Send + Sync {
    /// Revoke `request.token` at `revocation_endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `RevocationFailed` (or a transport error). The manager logs and
    /// discards it.
    async fn revoke(&self, request: &RevokeRequest, revocation_endpoint: &str) -> Result<()>;
}

#[async_trait]
impl<T: TokenRevoker + ?Sized> TokenRevoker for Arc<T> {
    async fn revoke(&self, request: &RevokeRequest, revocation_endpoint: &str) -> Result<()> {
        (**self).revoke(request, revocation_endpoint).await
    }
}

/// Revoker that does nothing, for setups without a revocation endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevoker;

#[async_trait]
impl TokenRevoker for NoopRevoker {
    async fn revoke(&self, _request: &RevokeRequest, _revocation_endpoint: &str) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// CSRF state generation
// ============================================================================

/// Produces a fresh CSRF nonce for each sign-in.
pub trait StateGenerator: Send + Sync {
    /// Generate a nonce; must not repeat across calls
    fn generate(&self) -> CsrfState;
}

impl<T: StateGenerator + ?Sized> StateGenerator for Arc<T> {
    fn generate(&self) -> CsrfState {
        (**self).generate()
    }
}

/// Alphanumeric nonces drawn from the thread-local CSPRNG
#[derive(Debug, Clone, Copy)]
pub struct RandomStateGenerator {
    length: usize,
}

impl RandomStateGenerator {
    /// Generator producing nonces of `length` characters
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomStateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_LENGTH)
    }
}

impl StateGenerator for RandomStateGenerator {
    fn generate(&self) -> CsrfState {
        let nonce: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        CsrfState::new(nonce)
    }
}

// ============================================================================
// Type aliases
// ============================================================================

/// Shared authorization exchange
pub type SharedExchange = Arc<dyn AuthorizationExchange>;

/// Shared API client
pub type SharedApiClient = Arc<dyn ApiClient>;

/// Shared token revoker
pub type SharedRevoker = Arc<dyn TokenRevoker>;

/// Shared state generator
pub type SharedStateGenerator = Arc<dyn StateGenerator>;

// ============================================================================
// Closure-based wrappers
// ============================================================================

/// Wrapper to convert a closure into an [`AuthorizationExchange`].
///
/// # Example
///
/// ```no_run
/// use auth_session::callbacks::{AuthorizationExchange, FnAuthorizationExchange};
/// use auth_session::types::ExchangeResult;
/// use std::sync::Arc;
///
/// let exchange = FnAuthorizationExchange::new(|url| {
///     Box::pin(async move {
///         println!("would open {url}");
///         Ok(ExchangeResult::cancelled())
///     })
/// });
///
/// let shared: Arc<dyn AuthorizationExchange> = Arc::new(exchange);
/// ```
pub struct FnAuthorizationExchange<F>
where
    F: Fn(String) -> BoxFuture<'static, Result<ExchangeResult>> + Send + Sync,
{
    func: F,
}

impl<F> FnAuthorizationExchange<F>
where
    F: Fn(String) -> BoxFuture<'static, Result<ExchangeResult>> + Send + Sync,
{
    /// Create a new closure-based exchange.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> AuthorizationExchange for FnAuthorizationExchange<F>
where
    F: Fn(String) -> BoxFuture<'static, Result<ExchangeResult>> + Send + Sync,
{
    async fn exchange(&self, auth_url: &str) -> Result<ExchangeResult> {
        (self.func)(auth_url.to_string()).await
    }
}

/// Wrapper to convert a closure into a [`TokenRevoker`].
pub struct FnTokenRevoker<F>
where
    F: Fn(RevokeRequest, String) -> BoxFuture<'static, Result<()>> + Send + Sync,
{
    func: F,
}

impl<F> FnTokenRevoker<F>
where
    F: Fn(RevokeRequest, String) -> BoxFuture<'static, Result<()>> + Send + Sync,
{
    /// Create a new closure-based revoker.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> TokenRevoker for FnTokenRevoker<F>
where
    F: Fn(RevokeRequest, String) -> BoxFuture<'static, Result<()>> + Send + Sync,
{
    async fn revoke(&self, request: &RevokeRequest, revocation_endpoint: &str) -> Result<()> {
        (self.func)(request.clone(), revocation_endpoint.to_string()).await
    }
}
