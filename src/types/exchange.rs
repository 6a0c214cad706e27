//! Authorization exchange and revocation payloads

use std::collections::HashMap;

use super::identifiers::{AccessToken, ClientId};

/// Terminal outcome of a browser authorization exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Provider redirected back; `params` carries the response
    Success,
    /// The exchange could not complete
    Failure,
    /// User dismissed the flow
    Cancelled,
}

/// Structured result of an authorization exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResult {
    /// How the exchange ended
    pub outcome: ExchangeOutcome,
    /// Redirect parameters (`access_token`, `state`, `error`, ...)
    pub params: HashMap<String, String>,
}

impl ExchangeResult {
    /// Successful exchange with the given redirect parameters
    pub fn success<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            outcome: ExchangeOutcome::Success,
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Failed exchange
    #[must_use]
    pub fn failure() -> Self {
        Self {
            outcome: ExchangeOutcome::Failure,
            params: HashMap::new(),
        }
    }

    /// Cancelled exchange
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            outcome: ExchangeOutcome::Cancelled,
            params: HashMap::new(),
        }
    }

    /// Look up a redirect parameter
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Token revocation request body
#[derive(Debug, Clone)]
pub struct RevokeRequest {
    /// Token to invalidate
    pub token: AccessToken,
    /// Application the token was issued to
    pub client_id: ClientId,
}
