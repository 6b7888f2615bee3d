//! Session store: who is signed in, what they may do, and persistence of both.
//!
//! ARCHITECTURE
//! ============
//! A [`Session`] is constructed once per running application and injected
//! wherever it is needed (Leptos context in the browser, a local in the CLI).
//! It owns no transport or storage of its own; those arrive as trait objects.
//!
//! LIFECYCLE
//! =========
//! `Initializing` → [`Session::initialize`] → `Ready`. Initialization restores
//! the persisted blob and trades its refresh token for a new pair; a failed
//! refresh silently empties the session. Protected UI must not render before
//! `Ready`.
//!
//! CONCURRENCY
//! ===========
//! `login`, `register`, and `logout` are not mutually excluded here; callers
//! disable their triggers while one is in flight. The internal mutex is only
//! held for synchronous reads and writes, never across an `.await`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::AuthApi;
use crate::error::AuthError;
use crate::events::{Notice, SessionEvents};
use crate::rbac::{Permission, Role};
use crate::routes;
use crate::storage::{SessionStorage, StoredSession};
use crate::user::{AuthUser, LoginResponse, SignUpPayload};

pub const LOGIN_SUCCESS: &str = "Signed in successfully.";
pub const LOGIN_FAILED: &str = "Unable to sign in. Check your credentials.";
pub const REGISTER_SUCCESS: &str = "Account created. A verification code was sent to your email.";
pub const REGISTER_FAILED: &str = "Registration is unavailable right now.";
pub const LOGOUT_DONE: &str = "You have been signed out.";

/// Whether startup restoration has finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Initializing,
    Ready,
}

/// Point-in-time copy of the session for rendering and guarding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub user: Option<AuthUser>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == SessionStatus::Ready
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(role))
    }

    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_any_role(roles))
    }

    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_permission(permission))
    }

    #[must_use]
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_any_permission(permissions))
    }
}

#[derive(Debug, Default)]
struct Inner {
    status: SessionStatus,
    init_started: bool,
    /// User and both tokens travel together so a partial session cannot exist.
    credentials: Option<StoredSession>,
    return_to: Option<String>,
}

/// The process-wide session store.
pub struct Session {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn SessionStorage>,
    events: Arc<dyn SessionEvents>,
    inner: Mutex<Inner>,
}

impl Session {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, storage: Arc<dyn SessionStorage>, events: Arc<dyn SessionEvents>) -> Self {
        Self { api, storage, events, inner: Mutex::new(Inner::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remote auth endpoints this session uses.
    #[must_use]
    pub fn api(&self) -> Arc<dyn AuthApi> {
        Arc::clone(&self.api)
    }

    /// Durable storage backing this session.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn SessionStorage> {
        Arc::clone(&self.storage)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            status: inner.status,
            user: inner.credentials.as_ref().map(|c| c.user.clone()),
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.lock().status
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status() == SessionStatus::Ready
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().credentials.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<AuthUser> {
        self.lock().credentials.as_ref().map(|c| c.user.clone())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.lock().credentials.as_ref().map(|c| c.access_token.clone())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.lock().credentials.as_ref().map(|c| c.refresh_token.clone())
    }

    /// Record where to send the user after a successful login.
    pub fn remember_return_to(&self, path: impl Into<String>) {
        self.lock().return_to = Some(path.into());
    }

    /// Consume the recorded return path.
    pub fn take_return_to(&self) -> Option<String> {
        self.lock().return_to.take()
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.events.session_changed(&snapshot);
    }

    /// Persist and adopt `stored`. A user is only ever held with both tokens.
    fn install(&self, stored: StoredSession) -> Result<(), AuthError> {
        if !stored.is_complete() {
            return Err(AuthError::Malformed("session is missing a token".to_owned()));
        }
        self.storage.save(&stored);
        self.lock().credentials = Some(stored);
        self.publish();
        Ok(())
    }

    fn discard(&self) {
        self.storage.remove();
        self.lock().credentials = None;
    }

    /// Restore the persisted session and refresh its tokens. Runs once.
    ///
    /// A failed refresh is treated as an expired session: storage is cleared
    /// and no notification is shown.
    pub async fn initialize(&self) {
        {
            let mut inner = self.lock();
            if inner.init_started {
                log::debug!("session: initialize already started");
                return;
            }
            inner.init_started = true;
        }

        match self.storage.load() {
            None => {
                if self.storage.read_raw().is_some() {
                    self.storage.remove();
                }
                log::debug!("session: no stored session");
            }
            Some(stored) => match self.api.refresh(&stored.refresh_token).await {
                Ok(tokens) => {
                    let renewed = StoredSession {
                        user: stored.user,
                        access_token: tokens.access_token,
                        refresh_token: tokens.refresh_token,
                    };
                    if renewed.is_complete() {
                        self.storage.save(&renewed);
                        self.lock().credentials = Some(renewed);
                        log::info!("session: restored and refreshed");
                    } else {
                        log::info!("session: refresh returned an empty token, session expired");
                        self.discard();
                    }
                }
                Err(e) => {
                    log::info!("session: refresh failed, session expired: {e}");
                    self.discard();
                }
            },
        }

        self.lock().status = SessionStatus::Ready;
        self.publish();
    }

    /// Sign in with email and password.
    ///
    /// On success the session is installed and the user is sent to the
    /// recorded return path (or home). On failure the existing session is
    /// left untouched and an error notice is shown.
    ///
    /// # Errors
    ///
    /// Returns the remote error; display it with
    /// [`AuthError::user_message`] and [`LOGIN_FAILED`].
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        match self.api.login(email, password).await.and_then(|res| self.install(res.into())) {
            Ok(()) => {
                self.events.notify(Notice::success(LOGIN_SUCCESS));
                let target = self.take_return_to().unwrap_or_else(|| routes::HOME.to_owned());
                log::info!("session: signed in, navigating to {target}");
                self.events.navigate(&target);
                Ok(())
            }
            Err(e) => {
                log::warn!("session: login failed: {e}");
                self.events.notify(Notice::error(e.user_message(LOGIN_FAILED)));
                Err(e)
            }
        }
    }

    /// Create a pending account and go to the verification page.
    ///
    /// No session is established; the backend issues tokens only after the
    /// one-time code is verified.
    ///
    /// # Errors
    ///
    /// Returns the remote error; display it with
    /// [`AuthError::user_message`] and [`REGISTER_FAILED`].
    pub async fn register(&self, payload: &SignUpPayload) -> Result<(), AuthError> {
        match self.api.register(payload).await {
            Ok(()) => {
                self.events.notify(Notice::success(REGISTER_SUCCESS));
                self.events.navigate(&routes::verify_otp_path(&payload.email));
                Ok(())
            }
            Err(e) => {
                log::warn!("session: registration failed: {e}");
                self.events.notify(Notice::error(e.user_message(REGISTER_FAILED)));
                Err(e)
            }
        }
    }

    /// Install the user and tokens returned by a successful code verification.
    ///
    /// Navigation and notification are left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Malformed`] if either token is empty; the current
    /// session is then left untouched.
    pub fn complete_verification(&self, res: LoginResponse) -> Result<(), AuthError> {
        log::info!("session: email verified for {}", res.user.email);
        self.install(res.into())
    }

    /// Sign out. Always succeeds locally, even if the server call fails.
    pub async fn logout(&self) {
        let token = self.access_token();
        if let Err(e) = self.api.logout(token.as_deref()).await {
            log::debug!("session: server logout failed, continuing: {e}");
        }
        self.discard();
        self.lock().return_to = None;
        self.publish();
        self.events.notify(Notice::info(LOGOUT_DONE));
        self.events.navigate(routes::LOGIN);
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.lock().credentials.as_ref().is_some_and(|c| c.user.has_role(role))
    }

    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.lock().credentials.as_ref().is_some_and(|c| c.user.has_any_role(roles))
    }

    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.lock().credentials.as_ref().is_some_and(|c| c.user.has_permission(permission))
    }

    #[must_use]
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.lock().credentials.as_ref().is_some_and(|c| c.user.has_any_permission(permissions))
    }
}
