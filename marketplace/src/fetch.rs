//! Generic fetch client with bearer-token injection.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every authenticated call goes through [`FetchClient`], which reads the
//! access token from [`SessionStorage`] at call time (never from an in-memory
//! copy) and hands a transport-neutral [`ApiRequest`] to an [`HttpTransport`].
//! The browser implements the transport with `gloo-net`, the CLI with
//! `reqwest`.
//!
//! TRADE-OFFS
//! ==========
//! One request per call: no retry, no refresh-on-401, no queueing. A failure
//! is returned to the caller as-is.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AuthError;
use crate::storage::SessionStorage;

/// HTTP method subset used by the marketplace API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A request relative to the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path beginning with `/`, including any query string.
    pub path: String,
    /// JSON body, already encoded.
    pub body: Option<String>,
    /// Access token to send as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, bearer: None }
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Malformed`] if `body` cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, AuthError> {
        let raw = serde_json::to_string(body).map_err(|e| AuthError::Malformed(format!("request body: {e}")))?;
        self.body = Some(raw);
        Ok(self)
    }

    #[must_use]
    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// Value for the `Authorization` header, if a token is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_deref().map(bearer_header)
    }
}

/// Raw response: status plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`AuthError::Http`].
    ///
    /// # Errors
    ///
    /// Returns the normalized HTTP error when the status is not 2xx.
    pub fn error_for_status(self) -> Result<Self, AuthError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AuthError::from_response(self.status, &self.body))
        }
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Malformed`] if the body does not decode as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AuthError> {
        serde_json::from_str(&self.body).map_err(|e| AuthError::Malformed(e.to_string()))
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations must not retry and must map only transport failures to
/// errors; non-2xx statuses are returned as responses.
#[async_trait::async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError>;
}

/// `Bearer <token>` header value.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Join an API base URL and a `/`-prefixed path without doubling slashes.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Token-injecting JSON client over an [`HttpTransport`].
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn HttpTransport>,
    storage: Arc<dyn SessionStorage>,
}

impl FetchClient {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, storage: Arc<dyn SessionStorage>) -> Self {
        Self { transport, storage }
    }

    /// Send `request` with the persisted access token attached.
    ///
    /// # Errors
    ///
    /// Returns transport errors and non-2xx responses as [`AuthError`].
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let request = request.bearer(self.storage.access_token());
        log::debug!("fetch: {} {}", request.method.as_str(), request.path);
        let response = self.transport.send(request).await?;
        response.error_for_status()
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See [`FetchClient::send`]; also fails if the body does not decode.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AuthError> {
        self.send(ApiRequest::new(Method::Get, path)).await?.json()
    }

    /// Send `body` as JSON with `method` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`FetchClient::send`]; also fails if the body does not decode.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, AuthError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::new(method, path).json(body)?).await?.json()
    }

    /// Send a body-less request and discard the response body.
    ///
    /// # Errors
    ///
    /// See [`FetchClient::send`].
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), AuthError> {
        self.send(ApiRequest::new(method, path)).await.map(|_| ())
    }
}
