//! Remote auth endpoints.
//!
//! [`AuthApi`] is the seam the session talks to; [`RestAuthApi`] implements it
//! over any [`HttpTransport`] so the browser and CLI share request shapes and
//! response parsing and differ only in how bytes move.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;

use crate::error::AuthError;
use crate::fetch::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::user::{LoginResponse, SignUpPayload, TokenPair, parse_auth_response, parse_token_pair};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const VERIFY_EMAIL_PATH: &str = "/auth/verify-email";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const VERIFY_RESET_CODE_PATH: &str = "/auth/verify-reset-code";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailCode<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct EmailOnly<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    email: &'a str,
    code: &'a str,
    new_password: &'a str,
}

/// Remote authentication operations.
///
/// # Errors
///
/// Every method returns [`AuthError`] for transport failures, non-2xx
/// responses (with the body's `message` when present), and malformed bodies.
#[async_trait::async_trait(?Send)]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`: email + password → user + tokens.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError>;

    /// `POST /auth/register`: creates a pending account; returns no tokens.
    async fn register(&self, payload: &SignUpPayload) -> Result<(), AuthError>;

    /// `POST /auth/verify-email`: email + one-time code → user + tokens.
    async fn verify_email(&self, email: &str, code: &str) -> Result<LoginResponse, AuthError>;

    /// `POST /auth/refresh`: refresh token → new token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// `POST /auth/logout`: best-effort server-side invalidation.
    async fn logout(&self, access_token: Option<&str>) -> Result<(), AuthError>;

    /// `POST /auth/forgot-password`: send a reset code to `email`.
    async fn forgot_password(&self, email: &str) -> Result<(), AuthError>;

    /// `POST /auth/verify-reset-code`: check a reset code before asking for a new password.
    async fn verify_reset_code(&self, email: &str, code: &str) -> Result<(), AuthError>;

    /// `POST /auth/reset-password`: set a new password using a verified code.
    async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<(), AuthError>;
}

/// [`AuthApi`] over JSON REST.
#[derive(Clone)]
pub struct RestAuthApi {
    transport: Arc<dyn HttpTransport>,
}

impl RestAuthApi {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, AuthError> {
        let request = ApiRequest::new(Method::Post, path).json(body)?;
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            log::warn!("auth: {path} failed with status {}", response.status);
        }
        response.error_for_status()
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for RestAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let response = self.post(LOGIN_PATH, &Credentials { email, password }).await?;
        parse_auth_response(&response.body)
    }

    async fn register(&self, payload: &SignUpPayload) -> Result<(), AuthError> {
        self.post(REGISTER_PATH, payload).await.map(|_| ())
    }

    async fn verify_email(&self, email: &str, code: &str) -> Result<LoginResponse, AuthError> {
        let response = self.post(VERIFY_EMAIL_PATH, &EmailCode { email, code }).await?;
        parse_auth_response(&response.body)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let response = self.post(REFRESH_PATH, &RefreshRequest { refresh_token }).await?;
        parse_token_pair(&response.body)
    }

    async fn logout(&self, access_token: Option<&str>) -> Result<(), AuthError> {
        let request = ApiRequest::new(Method::Post, LOGOUT_PATH).bearer(access_token.map(str::to_owned));
        self.transport.send(request).await?.error_for_status().map(|_| ())
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        self.post(FORGOT_PASSWORD_PATH, &EmailOnly { email }).await.map(|_| ())
    }

    async fn verify_reset_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        self.post(VERIFY_RESET_CODE_PATH, &EmailCode { email, code }).await.map(|_| ())
    }

    async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<(), AuthError> {
        let body = ResetPasswordRequest { email, code, new_password };
        self.post(RESET_PASSWORD_PATH, &body).await.map(|_| ())
    }
}
