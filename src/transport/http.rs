//! reqwest-backed API client with mutable default headers

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::callbacks::ApiClient;
use crate::error::{AuthSessionError, Result};
use crate::utils::error_body;

/// API client sending a shared set of default headers with every request
#[derive(Debug)]
pub struct ReqwestApiClient {
    http: reqwest::Client,
    base_url: String,
    headers: Mutex<HeaderMap>,
}

impl ReqwestApiClient {
    /// Client rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            headers: Mutex::new(HeaderMap::new()),
        }
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn headers(&self) -> MutexGuard<'_, HeaderMap> {
        self.headers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    fn set_header(&self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AuthSessionError::invalid_header(format!("{name}: {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| AuthSessionError::invalid_header(format!("{name}: {e}")))?;
        if name == reqwest::header::AUTHORIZATION {
            value.set_sensitive(true);
        }
        self.headers().insert(name, value);
        Ok(())
    }

    fn remove_header(&self, name: &str) {
        self.headers().remove(name);
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url_for(path);
        let headers = self.headers().clone();

        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).headers(headers).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthSessionError::http(status.as_u16(), error_body(&body)));
        }

        Ok(response.json().await?)
    }
}
