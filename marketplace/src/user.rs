//! Authenticated user record and auth endpoint payloads.
//!
//! DESIGN
//! ======
//! The backend returns a raw user (`account_type`, `email_verified`) with
//! tokens in one of several places. [`parse_auth_response`] normalizes that
//! into [`LoginResponse`], deriving roles and permissions client-side from the
//! account type so the rest of the crate never sees the raw shape.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::rbac::{AccountType, Permission, Role, effective_permissions};

/// The signed-in user as held by the session and persisted with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    /// Whether the account completed one-time-code email verification.
    #[serde(alias = "hasOTPValidated")]
    pub email_verified: bool,
    #[serde(default)]
    pub account_type: AccountType,
}

impl AuthUser {
    /// Build a user whose roles and permissions derive from `account_type`.
    #[must_use]
    pub fn from_account(
        id: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        account_type: AccountType,
        email_verified: bool,
    ) -> Self {
        let roles = vec![account_type.role()];
        let permissions = effective_permissions(&roles);
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
            roles,
            permissions,
            email_verified,
            account_type,
        }
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// `true` if the user holds at least one of `roles`; `false` for an empty slice.
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }

    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// `true` if the user holds at least one of `permissions`; `false` for an empty slice.
    #[must_use]
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|permission| self.has_permission(*permission))
    }
}

/// Access/refresh token pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// A user plus a fresh token pair, as returned by login and email verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: AuthUser,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginResponse {
    #[must_use]
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Seller sub-type chosen at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerType {
    Particular,
    Professional,
}

/// Registration request body (`POST /auth/register`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpPayload {
    pub email: String,
    pub password: String,
    pub username: String,
    pub account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_type: Option<SellerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
}

// =============================================================================
// BACKEND WIRE SHAPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct BackendUser {
    id: String,
    email: String,
    username: String,
    /// Kept as text so a tag this client does not know still signs in.
    #[serde(default)]
    account_type: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct BackendTokens {
    #[serde(default, rename = "accessToken", alias = "access_token")]
    access_token: Option<String>,
    #[serde(default, rename = "refreshToken", alias = "refresh_token")]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BackendAuthResponse {
    #[serde(default)]
    user: Option<BackendUser>,
    #[serde(default)]
    tokens: Option<BackendTokens>,
    #[serde(flatten)]
    top_level: BackendTokens,
}

impl From<BackendUser> for AuthUser {
    fn from(raw: BackendUser) -> Self {
        Self::from_account(
            raw.id,
            raw.email,
            raw.username,
            AccountType::from_tag(raw.account_type.as_deref()),
            raw.email_verified.unwrap_or(false),
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn pick_tokens(top_level: BackendTokens, nested: Option<BackendTokens>) -> Result<TokenPair, AuthError> {
    let nested = nested.unwrap_or_default();
    let access_token = non_empty(top_level.access_token).or_else(|| non_empty(nested.access_token));
    let refresh_token = non_empty(top_level.refresh_token).or_else(|| non_empty(nested.refresh_token));
    match (access_token, refresh_token) {
        (Some(access_token), Some(refresh_token)) => Ok(TokenPair { access_token, refresh_token }),
        _ => Err(AuthError::Malformed("tokens missing from auth response".to_owned())),
    }
}

/// Parse a successful login / verify-email body into a [`LoginResponse`].
///
/// # Errors
///
/// Returns [`AuthError::Malformed`] if the body is not JSON, has no `user`,
/// or lacks either token.
pub fn parse_auth_response(body: &str) -> Result<LoginResponse, AuthError> {
    let raw: BackendAuthResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Malformed(format!("auth response: {e}")))?;
    let user = raw
        .user
        .ok_or_else(|| AuthError::Malformed("auth response has no user".to_owned()))?;
    let tokens = pick_tokens(raw.top_level, raw.tokens)?;
    Ok(LoginResponse {
        user: user.into(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })
}

/// Parse a successful refresh body into a [`TokenPair`].
///
/// # Errors
///
/// Returns [`AuthError::Malformed`] if the body is not JSON or lacks either token.
pub fn parse_token_pair(body: &str) -> Result<TokenPair, AuthError> {
    let raw: BackendAuthResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Malformed(format!("refresh response: {e}")))?;
    pick_tokens(raw.top_level, raw.tokens)
}
