//! The authentication session manager

use std::sync::Arc;
use tokio::sync::{Mutex, watch};

use super::guard::{AUTHORIZATION_HEADER, BearerHeaderGuard, LoggingInGuard, SignOutCleanup};
use super::request::build_authorization_url;
use crate::callbacks::{
    RandomStateGenerator, SharedApiClient, SharedExchange, SharedRevoker, SharedStateGenerator,
};
use crate::config::AuthConfig;
use crate::error::{AuthSessionError, Result, SignInFailure};
use crate::store::SessionStore;
use crate::transport::{BrowserExchange, HttpTokenRevoker, ReqwestApiClient};
use crate::types::{
    AccessToken, AuthSnapshot, CsrfState, ExchangeOutcome, RevokeRequest, SignInOutcome, User,
    UsersResponse,
};

/// Header carrying the application id on every API request
pub const CLIENT_ID_HEADER: &str = "Client-Id";

/// Provider error code for a declined consent screen
const ACCESS_DENIED: &str = "access_denied";

/// A failed sign-in step: the category shown to callers plus the logged cause
type StepResult<T> = std::result::Result<T, (SignInFailure, AuthSessionError)>;

/// Builder for [`AuthSessionManager`]
///
/// Every collaborator has a default: the browser exchange, a reqwest API
/// client pointed at `config.api_base_url`, the HTTP revoker and random
/// 30-character CSRF nonces.
#[derive(Default)]
pub struct AuthSessionManagerBuilder {
    config: Option<AuthConfig>,
    exchange: Option<SharedExchange>,
    api: Option<SharedApiClient>,
    revoker: Option<SharedRevoker>,
    state_generator: Option<SharedStateGenerator>,
}

impl AuthSessionManagerBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set provider configuration
    #[must_use]
    pub fn config(mut self, config: AuthConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authorization exchange
    #[must_use]
    pub fn exchange(mut self, exchange: SharedExchange) -> Self {
        self.exchange = Some(exchange);
        self
    }

    /// Set the API client receiving `Client-Id` and `Authorization` headers
    #[must_use]
    pub fn api_client(mut self, api: SharedApiClient) -> Self {
        self.api = Some(api);
        self
    }

    /// Set the token revoker
    #[must_use]
    pub fn revoker(mut self, revoker: SharedRevoker) -> Self {
        self.revoker = Some(revoker);
        self
    }

    /// Set the CSRF state generator
    #[must_use]
    pub fn state_generator(mut self, generator: SharedStateGenerator) -> Self {
        self.state_generator = Some(generator);
        self
    }

    /// Build the manager and install the `Client-Id` header
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the default HTTP
    /// client cannot be created, or the API client rejects the header.
    pub fn build(self) -> Result<AuthSessionManager> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let api: SharedApiClient = match self.api {
            Some(api) => api,
            None => Arc::new(ReqwestApiClient::new(&config.api_base_url)?),
        };
        let exchange: SharedExchange = match self.exchange {
            Some(exchange) => exchange,
            None => Arc::new(BrowserExchange::new()),
        };
        let revoker: SharedRevoker = match self.revoker {
            Some(revoker) => revoker,
            None => Arc::new(HttpTokenRevoker::new()?),
        };
        let state_generator = self
            .state_generator
            .unwrap_or_else(|| Arc::new(RandomStateGenerator::default()));

        api.set_header(CLIENT_ID_HEADER, config.client_id.as_str())?;

        Ok(AuthSessionManager {
            config,
            exchange,
            api,
            revoker,
            state_generator,
            store: SessionStore::new(),
            operation: Mutex::new(()),
        })
    }
}

/// Owns the sign-in/sign-out lifecycle of one session.
///
/// `sign_in` and `sign_out` are serialized per instance; the published
/// `is_logging_in`/`is_logging_out` flags let a UI disable its triggers while
/// an operation runs.
pub struct AuthSessionManager {
    config: AuthConfig,
    exchange: SharedExchange,
    api: SharedApiClient,
    revoker: SharedRevoker,
    state_generator: SharedStateGenerator,
    store: SessionStore,
    operation: Mutex<()>,
}

impl std::fmt::Debug for AuthSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionManager")
            .field("config", &self.config)
            .field("state", &self.store.state())
            .finish_non_exhaustive()
    }
}

impl AuthSessionManager {
    /// Manager with default collaborators for `config`
    ///
    /// # Errors
    ///
    /// See [`AuthSessionManagerBuilder::build`].
    pub fn new(config: AuthConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for custom collaborators
    #[must_use]
    pub fn builder() -> AuthSessionManagerBuilder {
        AuthSessionManagerBuilder::new()
    }

    /// Provider configuration
    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authorization URL for a given nonce
    #[must_use]
    pub fn authorization_url(&self, state: &CsrfState) -> String {
        build_authorization_url(&self.config, state)
    }

    /// Run the implicit grant and establish a session.
    ///
    /// Cancellation, a failed exchange and a declined consent screen are not
    /// errors: they return the matching [`SignInOutcome`] and leave the
    /// session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthSessionError::SignInFailed`] for a CSRF state mismatch,
    /// a provider error, a missing token, or a failed profile fetch. No
    /// partial session survives a failure.
    pub async fn sign_in(&self) -> Result<SignInOutcome> {
        let _operation = self.operation.lock().await;
        let _logging_in = LoggingInGuard::acquire(&self.store);

        tracing::info!("Starting sign-in");
        match self.run_sign_in().await {
            Ok(outcome) => Ok(outcome),
            Err((kind, cause)) => {
                tracing::warn!(error = %cause, kind = %kind, "Sign-in failed");
                Err(AuthSessionError::sign_in_failed(kind))
            }
        }
    }

    async fn run_sign_in(&self) -> StepResult<SignInOutcome> {
        let state = self.state_generator.generate();
        let auth_url = self.authorization_url(&state);

        tracing::debug!(
            endpoint = %self.config.authorization_endpoint,
            "Starting authorization exchange"
        );
        let response = self
            .exchange
            .exchange(&auth_url)
            .await
            .map_err(|e| (SignInFailure::Exchange, e))?;

        match response.outcome {
            ExchangeOutcome::Success => {}
            ExchangeOutcome::Cancelled => {
                tracing::info!("Sign-in cancelled by user");
                return Ok(SignInOutcome::Cancelled);
            }
            ExchangeOutcome::Failure => {
                tracing::info!("Authorization exchange did not complete");
                return Ok(SignInOutcome::Failed);
            }
        }

        let provider_error = response.param("error");
        if provider_error == Some(ACCESS_DENIED) {
            tracing::info!("Authorization denied by user");
            return Ok(SignInOutcome::Denied);
        }

        if !state.matches(response.param("state")) {
            return Err((SignInFailure::InvalidState, AuthSessionError::InvalidState));
        }

        if let Some(error) = provider_error {
            let description = response.param("error_description").unwrap_or(error);
            return Err((
                SignInFailure::Provider,
                AuthSessionError::exchange(format!("{error}: {description}")),
            ));
        }

        let token = response
            .param("access_token")
            .filter(|t| !t.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| {
                (
                    SignInFailure::MissingToken,
                    AuthSessionError::exchange("redirect carried no access_token"),
                )
            })?;

        let header = BearerHeaderGuard::new(self.api.as_ref());
        self.api
            .set_header(AUTHORIZATION_HEADER, &token.bearer())
            .map_err(|e| (SignInFailure::Header, e))?;

        let user = self
            .fetch_profile()
            .await
            .map_err(|e| (SignInFailure::ProfileFetch, e))?;

        self.store.establish(user.clone(), token);
        header.commit();

        tracing::info!(user_id = user.id, display_name = %user.display_name, "Signed in");
        Ok(SignInOutcome::SignedIn(user))
    }

    async fn fetch_profile(&self) -> Result<User> {
        let body = self.api.get(&self.config.profile_path).await?;
        let response: UsersResponse = serde_json::from_value(body)
            .map_err(|e| AuthSessionError::profile_fetch(format!("malformed users response: {e}")))?;

        response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AuthSessionError::profile_fetch("users response contained no profile"))
    }

    /// Revoke the token (best effort) and clear the local session.
    ///
    /// Never fails: revocation errors are logged and discarded. The session,
    /// the bearer header and `is_logging_out` are cleared on every exit path,
    /// including when this future is dropped mid-revocation.
    pub async fn sign_out(&self) {
        let _operation = self.operation.lock().await;
        let _cleanup = SignOutCleanup::acquire(&self.store, self.api.as_ref());

        let Some(token) = self.store.state().token else {
            tracing::debug!("No active token, skipping revocation");
            return;
        };

        let request = RevokeRequest {
            token,
            client_id: self.config.client_id.clone(),
        };
        match self
            .revoker
            .revoke(&request, &self.config.revocation_endpoint)
            .await
        {
            Ok(()) => tracing::debug!("Token revoked"),
            Err(e) => tracing::warn!(error = %e, "Token revocation failed, clearing local session anyway"),
        }
    }

    /// Current snapshot
    #[must_use]
    pub fn state(&self) -> AuthSnapshot {
        self.store.state()
    }

    /// Receiver notified whenever the snapshot changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.store.subscribe()
    }

    /// Stream of snapshots, starting with the current one
    pub fn changes(&self) -> impl futures::Stream<Item = AuthSnapshot> + Send + 'static {
        self.store.changes()
    }

    /// Signed-in user
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.store.state().user
    }

    /// Access token of the current session
    #[must_use]
    pub fn access_token(&self) -> Option<AccessToken> {
        self.store.state().token
    }

    /// Whether a session is established
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.state().is_authenticated()
    }

    /// Whether a sign-in is in flight
    #[must_use]
    pub fn is_logging_in(&self) -> bool {
        self.store.state().is_logging_in
    }

    /// Whether a sign-out is in flight
    #[must_use]
    pub fn is_logging_out(&self) -> bool {
        self.store.state().is_logging_out
    }
}
