//! HTTP client for the sign-shop backend.
//!
//! # API Reference
//!
//! - Base URL: configured via `SIGNSHOP_API_BASE_URL`
//! - Authentication: `Authorization: Bearer <token>` on product, customer
//!   and order endpoints, taken from a [`Credentials`] value passed to each call
//! - Responses wrap their payload as `{ "data": { ... } }`; error bodies carry
//!   a `message`

mod categories;
mod coupons;
mod customers;
mod orders;
mod products;
mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::AdminConfig;
use crate::credentials::Credentials;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Missing or rejected token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// The message to show the operator: the backend's own message when it
    /// sent one, otherwise a description of the failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) | Self::NotFound(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Sign-shop backend client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &AdminConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config.api_base_url.clone(), config.http_timeout)
    }

    /// Create a client for an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_base_url(mut base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint path such as `api/product/7`.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Execute a GET request and unwrap the `data` envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        credentials: Option<&Credentials>,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.get(url);
        if let Some(credentials) = credentials {
            request = credentials.apply(request);
        }
        let response = request.send().await?;
        let envelope: Envelope<T> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }

    /// Execute a POST request with a JSON body and unwrap the `data` envelope.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        credentials: &Credentials,
    ) -> Result<T, ApiError> {
        let request = credentials.apply(self.inner.client.post(url).json(body));
        let response = request.send().await?;
        let envelope: Envelope<T> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        credentials: &Credentials,
    ) -> Result<ApiMessage, ApiError> {
        let request = credentials.apply(self.inner.client.put(url).json(body));
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::parse_error(response).await);
        }

        // The body is informational; an empty or non-JSON body is still a success.
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse error response from the backend.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let code = status.as_u16();

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiMessage>(&body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        tracing::warn!(status = code, %message, "Backend returned an error");

        match code {
            401 | 403 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Api {
                status: code,
                message,
            },
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
