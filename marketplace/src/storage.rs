//! Durable persistence of the session blob.
//!
//! SYSTEM CONTEXT
//! ==============
//! The whole session is stored as one JSON object under [`STORAGE_KEY`]. The
//! browser keeps it in `localStorage`, the CLI in a file; both implement
//! [`SessionStorage`] by moving raw strings, and the JSON handling lives here.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: a write that fails is logged and otherwise
//! ignored, and an unreadable blob is treated exactly like no blob.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::user::{AuthUser, LoginResponse};

/// Fixed key the session blob is stored under.
pub const STORAGE_KEY: &str = "gp_auth";

/// Persisted session blob: `{ user, accessToken, refreshToken }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub user: AuthUser,
    pub access_token: String,
    pub refresh_token: String,
}

impl StoredSession {
    /// Whether both tokens are present. Incomplete blobs are never restored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}

impl From<LoginResponse> for StoredSession {
    fn from(res: LoginResponse) -> Self {
        Self {
            user: res.user,
            access_token: res.access_token,
            refresh_token: res.refresh_token,
        }
    }
}

/// Parse a raw blob. Malformed or incomplete blobs yield `None`.
#[must_use]
pub fn decode_blob(raw: &str) -> Option<StoredSession> {
    match serde_json::from_str::<StoredSession>(raw) {
        Ok(stored) if stored.is_complete() => Some(stored),
        Ok(_) => {
            log::warn!("storage: discarding session blob with missing token");
            None
        }
        Err(e) => {
            log::warn!("storage: unreadable session blob: {e}");
            None
        }
    }
}

/// Raw key/value backend for the session blob.
pub trait SessionStorage: Send + Sync {
    /// Read the raw blob, if any.
    fn read_raw(&self) -> Option<String>;

    /// Replace the raw blob.
    fn write_raw(&self, raw: &str);

    /// Delete the blob.
    fn remove(&self);

    /// Load and decode the persisted session.
    fn load(&self) -> Option<StoredSession> {
        self.read_raw().as_deref().and_then(decode_blob)
    }

    /// Encode and persist `session`.
    fn save(&self, session: &StoredSession) {
        match serde_json::to_string(session) {
            Ok(raw) => self.write_raw(&raw),
            Err(e) => log::warn!("storage: failed to encode session: {e}"),
        }
    }

    /// Current access token, read from the persisted blob rather than memory.
    fn access_token(&self) -> Option<String> {
        self.load().map(|stored| stored.access_token)
    }
}

/// In-process storage used by tests and headless callers.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    raw: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a raw blob.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Mutex::new(Some(raw.into())) }
    }

    /// Storage pre-seeded with an encoded session.
    #[must_use]
    pub fn with_session(session: &StoredSession) -> Self {
        let storage = Self::new();
        storage.save(session);
        storage
    }
}

impl SessionStorage for MemoryStorage {
    fn read_raw(&self) -> Option<String> {
        self.raw.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn write_raw(&self, raw: &str) {
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.to_owned());
    }

    fn remove(&self) {
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
