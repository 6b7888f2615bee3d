//! Login page: email + password, with links to sign-up and password reset.
//!
//! Navigation and the success toast are handled by the session; this page
//! only shows the inline error for a failed attempt.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;
use marketplace::session::LOGIN_FAILED;
use marketplace::validate::validate_login;
use marketplace::{routes, Session};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Arc<Session>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login(&email.get(), &password.get()) {
            Ok(fields) => fields,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = session.login(&email_value, &password_value).await {
                    error.set(Some(e.user_message(LOGIN_FAILED)));
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, email_value, password_value, LOGIN_FAILED);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <Show when=move || error.get().is_some()>
                        <p class="auth-error" role="alert">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <A href=routes::FORGOT_PASSWORD attr:class="auth-link">"Forgot password?"</A>
                <p class="auth-footer">
                    "No account yet? "
                    <A href=routes::REGISTER>"Create one"</A>
                </p>
            </div>
        </div>
    }
}
