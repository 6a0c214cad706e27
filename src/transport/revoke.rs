//! Token revocation over HTTP

use async_trait::async_trait;
use std::time::Duration;

use crate::callbacks::TokenRevoker;
use crate::error::{AuthSessionError, Result};
use crate::types::RevokeRequest;
use crate::utils::error_body;

/// Default timeout for a revocation request
pub const DEFAULT_REVOKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts `client_id` and `token` as a form to the revocation endpoint
#[derive(Debug, Clone)]
pub struct HttpTokenRevoker {
    http: reqwest::Client,
}

impl HttpTokenRevoker {
    /// Revoker with [`DEFAULT_REVOKE_TIMEOUT`]
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_REVOKE_TIMEOUT)
    }

    /// Revoker with a custom request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Revoker reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TokenRevoker for HttpTokenRevoker {
    async fn revoke(&self, request: &RevokeRequest, revocation_endpoint: &str) -> Result<()> {
        let response = self
            .http
            .post(revocation_endpoint)
            .form(&[
                ("client_id", request.client_id.as_str()),
                ("token", request.token.secret()),
            ])
            .send()
            .await
            .map_err(|e| AuthSessionError::revocation(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AuthSessionError::revocation(format!(
            "{status}: {}",
            error_body(&body)
        )))
    }
}
