//! Route guard wrapper for pages that need a signed-in, authorized user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The decision itself is `marketplace::guard::evaluate_path`. This component
//! re-evaluates it whenever the location or the session snapshot changes,
//! records the requested path before a login redirect, and renders children
//! only on `Render`.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use marketplace::guard::{GuardDecision, Redirect, evaluate_path};
use marketplace::Session;

use crate::state::auth::AuthSignals;

/// Path plus query string, as recorded for the post-login return.
pub fn full_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Path to return to after login, when the redirect is a login redirect.
pub fn return_path(redirect: &Redirect) -> Option<&str> {
    match redirect {
        Redirect::Login { from } => Some(from),
        Redirect::VerifyEmail { .. } | Redirect::Forbidden(_) => None,
    }
}

/// Renders `children` only when the guard allows the current location.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthSignals>();
    let session = expect_context::<Arc<Session>>();
    let location = use_location();
    let navigate = use_navigate();

    let requested = Memo::new(move |_| full_path(&location.pathname.get(), &location.search.get()));
    let decision = Memo::new(move |_| evaluate_path(&auth.snapshot.get(), &requested.get()));

    Effect::new(move || {
        let GuardDecision::Redirect(redirect) = decision.get() else {
            return;
        };
        if let Some(from) = return_path(&redirect) {
            session.remember_return_to(from);
        }
        log::info!("guard: {} redirected ({})", requested.get_untracked(), redirect.reason());
        navigate(&redirect.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
    });

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Pending => view! {
            <div class="route-pending" aria-busy="true">
                <span class="spinner"></span>
            </div>
        }
        .into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
    }
}
