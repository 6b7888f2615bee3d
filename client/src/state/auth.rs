//! Reactive mirror of the session for the browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `marketplace::Session` owns the truth; the UI only reads signals. The
//! session reports changes through [`SessionBridge`], which writes the
//! snapshot, queued toasts, and requested navigation into signals that
//! route guards, the navbar, and the toaster subscribe to.
//!
//! Navigation cannot be performed from inside the session (it has no router
//! handle), so it is parked in `pending_navigation` and consumed by an
//! effect mounted under the router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use marketplace::rbac::Permission;
use marketplace::routes;
use marketplace::{Notice, SessionEvents, SessionSnapshot};

use crate::state::toast::ToastState;

/// Signals written by the session and read by the UI.
#[derive(Clone, Copy)]
pub struct AuthSignals {
    pub snapshot: RwSignal<SessionSnapshot>,
    pub toasts: RwSignal<ToastState>,
    pub pending_navigation: RwSignal<Option<String>>,
}

impl AuthSignals {
    pub fn new() -> Self {
        Self {
            snapshot: RwSignal::new(SessionSnapshot::default()),
            toasts: RwSignal::new(ToastState::default()),
            pending_navigation: RwSignal::new(None),
        }
    }
}

impl Default for AuthSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// `SessionEvents` implementation that feeds [`AuthSignals`].
pub struct SessionBridge {
    signals: AuthSignals,
}

impl SessionBridge {
    pub fn new(signals: AuthSignals) -> Self {
        Self { signals }
    }
}

impl SessionEvents for SessionBridge {
    fn navigate(&self, path: &str) {
        self.signals.pending_navigation.set(Some(path.to_owned()));
    }

    fn notify(&self, notice: Notice) {
        self.signals.toasts.update(|t| {
            t.push(notice);
        });
    }

    fn session_changed(&self, snapshot: &SessionSnapshot) {
        self.signals.snapshot.set(snapshot.clone());
    }
}

/// One navbar link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: String,
}

impl NavItem {
    fn new(label: &'static str, href: impl Into<String>) -> Self {
        Self { label, href: href.into() }
    }
}

/// Links the navbar shows for `snapshot`.
///
/// Nothing account-specific is shown until the session is ready, so the bar
/// does not flash "Log in" for a user whose session is still being restored.
pub fn nav_items(snapshot: &SessionSnapshot) -> Vec<NavItem> {
    let mut items = vec![NavItem::new("Home", routes::HOME)];
    if !snapshot.is_ready() {
        return items;
    }
    let Some(user) = &snapshot.user else {
        items.push(NavItem::new("Log in", routes::LOGIN));
        items.push(NavItem::new("Sign up", routes::REGISTER));
        return items;
    };
    if !user.email_verified {
        items.push(NavItem::new("Verify email", routes::verify_otp_path(&user.email)));
        return items;
    }
    if user.has_permission(Permission::MessagesAccess) {
        items.push(NavItem::new("Messages", routes::MESSAGES));
    }
    items.push(NavItem::new("Profile", routes::PROFILE));
    items
}

/// Name shown next to the logout button.
pub fn display_name(snapshot: &SessionSnapshot) -> Option<String> {
    snapshot.user.as_ref().map(|u| if u.username.is_empty() { u.email.clone() } else { u.username.clone() })
}
