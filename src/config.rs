//! Provider configuration
//!
//! [`AuthConfig`] is an immutable value handed to the manager at construction.
//! Defaults target Twitch's identity provider.

use typed_builder::TypedBuilder;

use crate::error::{AuthSessionError, Result};
use crate::types::ClientId;

// Twitch identity provider defaults
const DEFAULT_CLIENT_ID: &str = "lxqo8p0p2ww5qlek4chddtbpnju4jh";
const DEFAULT_AUTH_URL: &str = "https://id.twitch.tv/oauth2/authorize";
const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const DEFAULT_REVOCATION_URL: &str = "https://id.twitch.tv/oauth2/revoke";
const DEFAULT_REDIRECT_URI: &str = "http://localhost";
const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix";
const DEFAULT_PROFILE_PATH: &str = "/users";

/// Scopes requested on every sign-in
pub const DEFAULT_SCOPES: [&str; 3] = ["openid", "user:read:email", "user:read:follows"];

/// Environment variable overriding the client id
pub const ENV_CLIENT_ID: &str = "AUTH_SESSION_CLIENT_ID";
/// Environment variable overriding the redirect URI
pub const ENV_REDIRECT_URI: &str = "AUTH_SESSION_REDIRECT_URI";
/// Environment variable overriding the API base URL
pub const ENV_API_BASE_URL: &str = "AUTH_SESSION_API_BASE_URL";

/// Identity provider configuration
#[derive(Debug, Clone, TypedBuilder)]
#[builder(
    builder_method(doc = "Create a new builder for AuthConfig"),
    builder_type(doc = "Builder for AuthConfig", vis = "pub"),
    build_method(doc = "Build the AuthConfig")
)]
pub struct AuthConfig {
    /// Application id issued by the provider
    #[builder(default = ClientId::new(DEFAULT_CLIENT_ID), setter(into))]
    pub client_id: ClientId,

    /// Authorization endpoint
    #[builder(default = DEFAULT_AUTH_URL.to_string(), setter(into))]
    pub authorization_endpoint: String,

    /// Token endpoint (unused by the implicit grant, kept for completeness)
    #[builder(default = DEFAULT_TOKEN_URL.to_string(), setter(into))]
    pub token_endpoint: String,

    /// Revocation endpoint
    #[builder(default = DEFAULT_REVOCATION_URL.to_string(), setter(into))]
    pub revocation_endpoint: String,

    /// Redirect target registered with the provider
    #[builder(default = DEFAULT_REDIRECT_URI.to_string(), setter(into))]
    pub redirect_uri: String,

    /// Requested scopes
    #[builder(default = DEFAULT_SCOPES.iter().map(ToString::to_string).collect())]
    pub scopes: Vec<String>,

    /// Force the consent screen even if previously granted
    #[builder(default = true)]
    pub force_verify: bool,

    /// Base URL of the provider's API
    #[builder(default = DEFAULT_API_BASE_URL.to_string(), setter(into))]
    pub api_base_url: String,

    /// Path of the authenticated-user profile endpoint, relative to the API base
    #[builder(default = DEFAULT_PROFILE_PATH.to_string(), setter(into))]
    pub profile_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AuthConfig {
    /// Defaults with environment overrides applied
    ///
    /// Reads [`ENV_CLIENT_ID`], [`ENV_REDIRECT_URI`] and [`ENV_API_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the resulting configuration fails [`validate`](Self::validate).
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(client_id) = env_non_empty(ENV_CLIENT_ID) {
            config.client_id = ClientId::new(client_id);
        }
        if let Some(redirect_uri) = env_non_empty(ENV_REDIRECT_URI) {
            config.redirect_uri = redirect_uri;
        }
        if let Some(api_base_url) = env_non_empty(ENV_API_BASE_URL) {
            config.api_base_url = api_base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Space-separated scope string
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// Check that required values are present and endpoints are absolute URLs
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(AuthSessionError::invalid_config("client_id must not be empty"));
        }

        for (name, value) in [
            ("authorization_endpoint", &self.authorization_endpoint),
            ("revocation_endpoint", &self.revocation_endpoint),
            ("redirect_uri", &self.redirect_uri),
            ("api_base_url", &self.api_base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| AuthSessionError::invalid_config(format!("{name}: {e}")))?;
        }

        if self.scopes.is_empty() {
            return Err(AuthSessionError::invalid_config("at least one scope is required"));
        }

        Ok(())
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
