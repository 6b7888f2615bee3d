//! Browser transport for the shared fetch client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every request fails with a transport error, since the
//! API is only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only network-level failures become errors here. Non-2xx statuses are
//! returned as responses so `marketplace::fetch` can normalize them.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use marketplace::AuthError;
use marketplace::fetch::{ApiRequest, ApiResponse, HttpTransport};
#[cfg(any(test, feature = "hydrate"))]
use marketplace::fetch::{Method, join_url};

/// API base used when none is configured at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// API base URL, fixed at build time by `MARKETPLACE_API_BASE`.
pub fn api_base() -> &'static str {
    option_env!("MARKETPLACE_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

#[cfg(any(test, feature = "hydrate"))]
fn request_url(base: &str, request: &ApiRequest) -> String {
    join_url(base, &request.path)
}

#[cfg(feature = "hydrate")]
fn gloo_method(method: Method) -> gloo_net::http::Method {
    use gloo_net::http::Method as Gloo;
    match method {
        Method::Get => Gloo::GET,
        Method::Post => Gloo::POST,
        Method::Put => Gloo::PUT,
        Method::Patch => Gloo::PATCH,
        Method::Delete => Gloo::DELETE,
    }
}

/// `HttpTransport` over `gloo-net` against a fixed API base.
#[derive(Clone, Debug)]
pub struct BrowserTransport {
    base: String,
}

impl BrowserTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for BrowserTransport {
    fn default() -> Self {
        Self::new(api_base())
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::RequestBuilder;

            let url = request_url(&self.base, &request);
            log::debug!("http: {} {url}", request.method.as_str());
            let mut builder = RequestBuilder::new(&url).method(gloo_method(request.method));
            if let Some(header) = request.authorization() {
                builder = builder.header("Authorization", &header);
            }
            let built = match request.body {
                Some(body) => builder.header("Content-Type", "application/json").body(body),
                None => builder.build(),
            }
            .map_err(|e| AuthError::Transport(e.to_string()))?;

            let resp = built.send().await.map_err(|e| AuthError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| AuthError::Transport(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(AuthError::Transport("not available on server".to_owned()))
        }
    }
}
