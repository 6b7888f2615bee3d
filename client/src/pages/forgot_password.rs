//! Password reset: request a code, check it, then set a new password.
//!
//! DESIGN
//! ======
//! Three steps on one page, driven by [`ResetStep`]. Each step makes exactly
//! one call through the session's `AuthApi`; the step only advances on
//! success so a failed call can be retried with the same input.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use marketplace::validate::{normalize_code_input, validate_email, validate_password_reset, validate_verification};
use marketplace::{Notice, Session, routes};

use crate::state::auth::AuthSignals;

const RESET_FAILED: &str = "Password reset failed. Try again.";
const RESET_DONE: &str = "Password updated. You can sign in now.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetStep {
    RequestCode,
    CheckCode,
    NewPassword,
}

impl ResetStep {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::RequestCode => Some(Self::CheckCode),
            Self::CheckCode => Some(Self::NewPassword),
            Self::NewPassword => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::RequestCode => "Reset your password",
            Self::CheckCode => "Enter the code we sent you",
            Self::NewPassword => "Choose a new password",
        }
    }

    pub fn button(self) -> &'static str {
        match self {
            Self::RequestCode => "Send code",
            Self::CheckCode => "Check code",
            Self::NewPassword => "Update password",
        }
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let session = expect_context::<Arc<Session>>();
    let auth = expect_context::<AuthSignals>();
    let navigate = use_navigate();

    let step = RwSignal::new(ResetStep::RequestCode);
    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let current = step.get();
        let checked = match current {
            ResetStep::RequestCode => validate_email(&email.get()).map(|e| (e, String::new())),
            ResetStep::CheckCode => validate_verification(&email.get(), &code.get()),
            ResetStep::NewPassword => validate_password_reset(&email.get(), &code.get(), &password.get(), &confirm.get()),
        };
        let (email_value, code_value) = match checked {
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
            let api = session.api();
            let password_value = password.get();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match current {
                    ResetStep::RequestCode => api.forgot_password(&email_value).await,
                    ResetStep::CheckCode => api.verify_reset_code(&email_value, &code_value).await,
                    ResetStep::NewPassword => api.reset_password(&email_value, &code_value, &password_value).await,
                };
                busy.set(false);
                match (result, current.next()) {
                    (Err(e), _) => error.set(Some(e.user_message(RESET_FAILED))),
                    (Ok(()), Some(next)) => step.set(next),
                    (Ok(()), None) => {
                        auth.toasts.update(|t| {
                            t.push(Notice::success(RESET_DONE));
                        });
                        navigate(routes::LOGIN, NavigateOptions::default());
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &auth, &navigate, email_value, code_value, RESET_FAILED, RESET_DONE);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{move || step.get().title()}</h1>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            prop:disabled=move || step.get() != ResetStep::RequestCode
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <Show when=move || step.get() != ResetStep::RequestCode>
                        <label class="auth-label">
                            "Code"
                            <input
                                class="auth-input auth-input--code"
                                type="text"
                                inputmode="numeric"
                                maxlength="6"
                                prop:disabled=move || step.get() == ResetStep::NewPassword
                                prop:value=move || code.get()
                                on:input=move |ev| code.set(normalize_code_input(&event_target_value(&ev)))
                            />
                        </label>
                    </Show>
                    <Show when=move || step.get() == ResetStep::NewPassword>
                        <label class="auth-label">
                            "New password"
                            <input
                                class="auth-input"
                                type="password"
                                autocomplete="new-password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="auth-label">
                            "Confirm password"
                            <input
                                class="auth-input"
                                type="password"
                                autocomplete="new-password"
                                prop:value=move || confirm.get()
                                on:input=move |ev| confirm.set(event_target_value(&ev))
                            />
                        </label>
                    </Show>
                    <Show when=move || error.get().is_some()>
                        <p class="auth-error" role="alert">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || step.get().button()}
                    </button>
                </form>
                <A href=routes::LOGIN attr:class="auth-link">"Back to sign in"</A>
            </div>
        </div>
    }
}
