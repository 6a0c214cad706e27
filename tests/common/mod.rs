//! In-memory capability fakes shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use auth_session::types::{CsrfState, ExchangeResult, RevokeRequest};
use auth_session::{
    ApiClient, AuthConfig, AuthSessionError, AuthSessionManager, AuthorizationExchange,
    StateGenerator, TokenRevoker,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CLIENT_ID: &str = "test-client";
pub const REVOKE_URL: &str = "https://id.example.test/oauth2/revoke";

pub fn config() -> AuthConfig {
    AuthConfig::builder()
        .client_id(CLIENT_ID)
        .authorization_endpoint("https://id.example.test/oauth2/authorize")
        .revocation_endpoint(REVOKE_URL)
        .redirect_uri("https://app.example.test/redirect")
        .api_base_url("https://api.example.test/helix")
        .build()
}

pub fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "data": [{
            "id": 1,
            "display_name": "a",
            "email": "a@x",
            "profile_image_url": "u"
        }]
    })
}

/// Read the `state` parameter back out of an authorization URL
pub fn state_of(auth_url: &str) -> Option<String> {
    url::Url::parse(auth_url)
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
}

// ============================================================================
// API client
// ============================================================================

#[derive(Default)]
pub struct FakeApi {
    headers: Mutex<HashMap<String, String>>,
    profile: Mutex<Option<serde_json::Value>>,
    pub gets: Mutex<Vec<String>>,
    /// `Authorization` header value observed at each GET
    pub auth_at_get: Mutex<Vec<Option<String>>>,
}

impl FakeApi {
    /// API answering every GET with `profile`
    pub fn with_profile(profile: serde_json::Value) -> Arc<Self> {
        let api = Self::default();
        *api.profile.lock().unwrap() = Some(profile);
        Arc::new(api)
    }

    /// API failing every GET
    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_profile(&self, profile: Option<serde_json::Value>) {
        *self.profile.lock().unwrap() = profile;
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    fn set_header(&self, name: &str, value: &str) -> auth_session::Result<()> {
        if value.contains('\n') {
            return Err(AuthSessionError::invalid_header(name));
        }
        self.headers
            .lock()
            .unwrap()
            .insert(name.to_ascii_lowercase(), value.to_string());
        Ok(())
    }

    fn remove_header(&self, name: &str) {
        self.headers.lock().unwrap().remove(&name.to_ascii_lowercase());
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .lock()
            .unwrap()
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    async fn get(&self, path: &str) -> auth_session::Result<serde_json::Value> {
        self.gets.lock().unwrap().push(path.to_string());
        self.auth_at_get
            .lock()
            .unwrap()
            .push(self.header("Authorization"));
        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AuthSessionError::http(500, "profile endpoint down"))
    }
}

// ============================================================================
// Authorization exchange
// ============================================================================

type Responder = dyn Fn(&str) -> auth_session::Result<ExchangeResult> + Send + Sync;

/// Exchange answering with a function of the authorization URL
pub struct ScriptedExchange {
    respond: Box<Responder>,
    pub urls: Mutex<Vec<String>>,
}

impl ScriptedExchange {
    pub fn new(
        respond: impl Fn(&str) -> auth_session::Result<ExchangeResult> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Provider echoing the request's state and returning `token`
    pub fn granting(token: &'static str) -> Arc<Self> {
        Self::new(move |url| {
            let state = state_of(url).unwrap_or_default();
            Ok(ExchangeResult::success([
                ("access_token", token.to_string()),
                ("state", state),
                ("token_type", "bearer".to_string()),
            ]))
        })
    }

    /// Provider returning fixed params regardless of the request
    pub fn returning(result: ExchangeResult) -> Arc<Self> {
        Self::new(move |_| Ok(result.clone()))
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl AuthorizationExchange for ScriptedExchange {
    async fn exchange(&self, auth_url: &str) -> auth_session::Result<ExchangeResult> {
        self.urls.lock().unwrap().push(auth_url.to_string());
        (self.respond)(auth_url)
    }
}

// ============================================================================
// Revocation
// ============================================================================

pub enum RevokeBehavior {
    Succeed,
    Fail,
    Hang,
}

pub struct FakeRevoker {
    behavior: RevokeBehavior,
    pub requests: Mutex<Vec<(String, String, String)>>,
    pub calls: AtomicUsize,
}

impl FakeRevoker {
    pub fn new(behavior: RevokeBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRevoker for FakeRevoker {
    async fn revoke(
        &self,
        request: &RevokeRequest,
        revocation_endpoint: &str,
    ) -> auth_session::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((
            request.token.secret().to_string(),
            request.client_id.as_str().to_string(),
            revocation_endpoint.to_string(),
        ));
        match self.behavior {
            RevokeBehavior::Succeed => Ok(()),
            RevokeBehavior::Fail => Err(AuthSessionError::revocation("connection reset")),
            RevokeBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        }
    }
}

// ============================================================================
// CSRF state
// ============================================================================

/// Generator returning the same nonce every time
pub struct FixedState(pub &'static str);

impl StateGenerator for FixedState {
    fn generate(&self) -> CsrfState {
        CsrfState::new(self.0)
    }
}

// ============================================================================
// Manager wiring
// ============================================================================

pub fn manager(
    exchange: Arc<ScriptedExchange>,
    api: Arc<FakeApi>,
    revoker: Arc<FakeRevoker>,
) -> AuthSessionManager {
    AuthSessionManager::builder()
        .config(config())
        .exchange(exchange)
        .api_client(api)
        .revoker(revoker)
        .build()
        .expect("manager builds with fake collaborators")
}
