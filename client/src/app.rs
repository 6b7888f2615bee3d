//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use marketplace::api::RestAuthApi;
use marketplace::fetch::{FetchClient, HttpTransport};
use marketplace::{Session, SessionStorage};

use crate::components::navbar::Navbar;
use crate::components::protected_route::ProtectedRoute;
use crate::components::toaster::Toaster;
use crate::net::fetch::BrowserTransport;
use crate::pages::{
    forbidden::ForbiddenPage, forgot_password::ForgotPasswordPage, home::HomePage, login::LoginPage,
    messages::MessagesPage, not_found::NotFoundPage, profile::ProfilePage, register::RegisterPage,
    verify_otp::VerifyOtpPage,
};
use crate::state::auth::{AuthSignals, SessionBridge};
use crate::util::storage::BrowserStorage;

/// Root application component.
///
/// Builds the session and the fetch client over the browser transport and
/// `localStorage`, provides them as context, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthSignals::new();
    let transport: Arc<dyn HttpTransport> = Arc::new(BrowserTransport::default());
    let storage: Arc<dyn SessionStorage> = Arc::new(BrowserStorage);
    let session = Arc::new(Session::new(
        Arc::new(RestAuthApi::new(transport.clone())),
        storage.clone(),
        Arc::new(SessionBridge::new(auth)),
    ));
    let fetch = FetchClient::new(transport, storage);

    provide_context(auth);
    provide_context(session.clone());
    provide_context(fetch);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        session.initialize().await;
    });
    #[cfg(not(feature = "hydrate"))]
    drop(session);

    view! {
        <Title text="Marketplace"/>

        <Router>
            <NavigationBridge/>
            <Navbar/>
            <Toaster/>
            <main class="page">
                <Routes fallback=|| view! { <ProtectedRoute><NotFoundPage/></ProtectedRoute> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("verify-otp") view=VerifyOtpPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("forbidden") view=ForbiddenPage/>
                    <Route path=StaticSegment("notfound") view=NotFoundPage/>
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("messages")
                        view=|| view! { <ProtectedRoute><MessagesPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("messages"), ParamSegment("user_id"))
                        view=|| view! { <ProtectedRoute><MessagesPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Applies navigations requested by the session (login, logout, verification).
#[component]
fn NavigationBridge() -> impl IntoView {
    let auth = expect_context::<AuthSignals>();
    let navigate = use_navigate();

    Effect::new(move || {
        let Some(path) = auth.pending_navigation.get() else {
            return;
        };
        auth.pending_navigation.set(None);
        navigate(&path, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });
}
