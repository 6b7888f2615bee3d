//! Normalized error for every remote auth/data call.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx responses, malformed bodies, and local
//! validation all collapse into [`AuthError`] so pages can render one inline
//! message and the session can decide whether to notify.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Error returned by auth and data calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{}", describe_status(.status, .message))]
    Http { status: u16, message: Option<String> },
    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    Malformed(String),
    /// Input was rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),
}

fn describe_status(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP {status}"),
    }
}

impl AuthError {
    /// Build an HTTP error from a status code and raw response body.
    ///
    /// The body's `message` field is used when it is a string, or joined with
    /// newlines when it is an array of strings (validation error lists).
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http { status, message: body_message(body) }
    }

    /// HTTP status if this is an HTTP error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a toast or inline error.
    ///
    /// Server-provided messages and local validation text are shown as-is;
    /// anything else (bare status codes, transport noise) is replaced by
    /// `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http { message: Some(message), .. } => message.clone(),
            Self::Validation(message) => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

/// Extract a human-readable `message` from a JSON error body.
#[must_use]
pub fn body_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    match value.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let lines: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if lines.is_empty() { None } else { Some(lines.join("\n")) }
        }
        _ => None,
    }
}
