//! Shared fakes for unit tests: a scripted transport and an event recorder.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::api::RestAuthApi;
use crate::error::AuthError;
use crate::events::{Notice, SessionEvents};
use crate::fetch::{ApiRequest, ApiResponse, HttpTransport};
use crate::rbac::AccountType;
use crate::session::{Session, SessionSnapshot};
use crate::storage::{MemoryStorage, SessionStorage, StoredSession};
use crate::user::AuthUser;

// =============================================================================
// ScriptedTransport
// =============================================================================

/// Answers requests from a queue and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, AuthError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) {
        self.push(Ok(ApiResponse { status, body: body.into() }));
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) {
        self.respond(status, body.to_string());
    }

    pub fn fail(&self, message: &str) {
        self.push(Err(AuthError::Transport(message.to_owned())));
    }

    fn push(&self, response: Result<ApiResponse, AuthError>) {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(AuthError::Transport("no scripted response".to_owned())))
    }
}

// =============================================================================
// RecordingEvents
// =============================================================================

/// Captures navigation, notices, and state-change callbacks.
#[derive(Default)]
pub struct RecordingEvents {
    navigations: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
    snapshots: Mutex<Vec<SessionSnapshot>>,
}

impl RecordingEvents {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn snapshots(&self) -> Vec<SessionSnapshot> {
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SessionEvents for RecordingEvents {
    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap_or_else(PoisonError::into_inner).push(path.to_owned());
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).push(notice);
    }

    fn session_changed(&self, snapshot: &SessionSnapshot) {
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner).push(snapshot.clone());
    }
}

// =============================================================================
// fixtures
// =============================================================================

pub fn user(account_type: AccountType, verified: bool) -> AuthUser {
    AuthUser::from_account("u-1", "a@b.com", "alice", account_type, verified)
}

pub fn stored(user: AuthUser, access: &str, refresh: &str) -> StoredSession {
    StoredSession { user, access_token: access.to_owned(), refresh_token: refresh.to_owned() }
}

/// Backend login body for a user of `account_type`.
pub fn login_body(account_type: &str, verified: bool, access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "user": {
            "id": "u-9",
            "email": "a@b.com",
            "username": "alice",
            "account_type": account_type,
            "email_verified": verified
        },
        "accessToken": access,
        "refreshToken": refresh
    })
}

/// A session wired to scripted fakes.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub storage: Arc<MemoryStorage>,
    pub events: Arc<RecordingEvents>,
    pub session: Session,
}

impl Harness {
    pub fn new(storage: MemoryStorage) -> Self {
        let transport = ScriptedTransport::new();
        let storage = Arc::new(storage);
        let events = Arc::new(RecordingEvents::default());
        let api = Arc::new(RestAuthApi::new(transport.clone()));
        let session = Session::new(api, storage.clone(), events.clone());
        Self { transport, storage, events, session }
    }

    pub fn empty() -> Self {
        Self::new(MemoryStorage::new())
    }

    pub fn with_stored(stored: &StoredSession) -> Self {
        Self::new(MemoryStorage::with_session(stored))
    }

    pub fn persisted(&self) -> Option<StoredSession> {
        self.storage.load()
    }
}
