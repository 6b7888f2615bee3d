//! `reqwest` transport for the shared fetch client and auth API.
//!
//! Only connection-level failures become errors. Non-2xx statuses come back
//! as responses so `marketplace::fetch` can normalize them.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use marketplace::AuthError;
use marketplace::fetch::{ApiRequest, ApiResponse, HttpTransport, Method, join_url};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// `HttpTransport` over a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base: String,
}

impl ReqwestTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let url = join_url(&self.base, &request.path);
        tracing::debug!(method = request.method.as_str(), %url, "http request");

        let mut builder = self.client.request(reqwest_method(request.method), &url);
        if let Some(header) = request.authorization() {
            builder = builder.header(AUTHORIZATION, header);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(|e| AuthError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| AuthError::Transport(e.to_string()))?;
        tracing::debug!(status, %url, "http response");
        Ok(ApiResponse { status, body })
    }
}
