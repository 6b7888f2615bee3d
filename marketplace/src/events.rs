//! UI side effects requested by the session: navigation and notifications.

use crate::session::SessionSnapshot;

/// Severity of a transient notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A transient, user-visible notification (toast).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// How long the notice stays visible, in milliseconds.
    pub duration_ms: u32,
}

/// Default visibility for success and info notices.
pub const NOTICE_DURATION_MS: u32 = 3_500;
/// Errors stay up longer.
pub const ERROR_NOTICE_DURATION_MS: u32 = 8_000;

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into(), duration_ms: NOTICE_DURATION_MS }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into(), duration_ms: NOTICE_DURATION_MS }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into(), duration_ms: ERROR_NOTICE_DURATION_MS }
    }
}

/// Host environment the session drives.
///
/// The browser maps these onto router navigation, a toast signal, and a
/// reactive auth mirror; the CLI prints them.
pub trait SessionEvents: Send + Sync {
    /// Navigate to `path` (path plus optional query), replacing history.
    fn navigate(&self, path: &str);

    /// Show a transient notification.
    fn notify(&self, notice: Notice);

    /// Called after every change to the in-memory session.
    fn session_changed(&self, _snapshot: &SessionSnapshot) {}
}
