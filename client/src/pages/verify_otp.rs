//! Email verification with the 6-digit code sent at registration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from registration (`/verify-otp?email=...`) or from the route
//! guard when a signed-in account is not yet verified. A correct code
//! returns a full session, which is installed before leaving the page.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use marketplace::validate::{CODE_LENGTH, mask_email, normalize_code_input, validate_verification};
use marketplace::{Notice, Session, routes};

use crate::state::auth::AuthSignals;

const VERIFY_FAILED: &str = "Invalid or expired code.";
const VERIFIED: &str = "Email verified. Welcome!";

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let session = expect_context::<Arc<Session>>();
    let auth = expect_context::<AuthSignals>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = Memo::new(move |_| query.with(|q| q.get("email").unwrap_or_default()));
    let code = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, code_value) = match validate_verification(&email.get(), &code.get()) {
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
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let verified = session.api().verify_email(&email_value, &code_value).await;
                match verified.and_then(|res| session.complete_verification(res)) {
                    Ok(()) => {
                        auth.toasts.update(|t| {
                            t.push(Notice::success(VERIFIED));
                        });
                        let target = session.take_return_to().unwrap_or_else(|| routes::HOME.to_owned());
                        navigate(&target, NavigateOptions::default());
                    }
                    Err(e) => {
                        log::warn!("verify: code rejected: {e}");
                        error.set(Some(e.user_message(VERIFY_FAILED)));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &auth, &navigate, email_value, code_value, VERIFIED, VERIFY_FAILED);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Verify your email"</h1>
                <p class="auth-card__subtitle">
                    {move || {
                        let email = email.get();
                        if email.is_empty() {
                            "Enter the code we emailed you.".to_owned()
                        } else {
                            format!("We sent a {CODE_LENGTH}-digit code to {}.", mask_email(&email))
                        }
                    }}
                </p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input auth-input--code"
                        type="text"
                        inputmode="numeric"
                        autocomplete="one-time-code"
                        maxlength=CODE_LENGTH.to_string()
                        placeholder="000000"
                        prop:value=move || code.get()
                        on:input=move |ev| code.set(normalize_code_input(&event_target_value(&ev)))
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="auth-error" role="alert">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || busy.get() || code.get().len() != CODE_LENGTH
                    >
                        "Verify"
                    </button>
                </form>
            </div>
        </div>
    }
}
