//! Sign-up page for buyers and sellers (private or professional).
//!
//! A successful registration does not sign the user in; the session sends
//! them to the verification page with their email in the query string.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;
use marketplace::session::REGISTER_FAILED;
use marketplace::user::SellerType;
use marketplace::validate::{RegisterForm, validate_registration};
use marketplace::{Session, routes};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<Arc<Session>>();
    let form = RwSignal::new(RegisterForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let is_seller = move || form.with(|f| f.wants_to_sell);
    let is_pro = move || form.with(|f| f.wants_to_sell && f.seller_type == Some(SellerType::Professional));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match validate_registration(&form.get()) {
            Ok(payload) => payload,
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
                if let Err(e) = session.register(&payload).await {
                    error.set(Some(e.user_message(REGISTER_FAILED)));
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, payload, REGISTER_FAILED);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Create an account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Username"
                        <input
                            class="auth-input"
                            type="text"
                            autocomplete="username"
                            prop:value=move || form.with(|f| f.username.clone())
                            on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Confirm password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password_confirm.clone())
                            on:input=move |ev| form.update(|f| f.password_confirm = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-check">
                        <input
                            type="checkbox"
                            prop:checked=is_seller
                            on:change=move |ev| form.update(|f| f.wants_to_sell = event_target_checked(&ev))
                        />
                        "I want to sell on the marketplace"
                    </label>
                    <Show when=is_seller>
                        <fieldset class="auth-fieldset">
                            <legend>"Seller type"</legend>
                            <label class="auth-check">
                                <input
                                    type="radio"
                                    name="seller_type"
                                    prop:checked=move || !is_pro()
                                    on:change=move |_| form.update(|f| f.seller_type = Some(SellerType::Particular))
                                />
                                "Private seller"
                            </label>
                            <label class="auth-check">
                                <input
                                    type="radio"
                                    name="seller_type"
                                    prop:checked=is_pro
                                    on:change=move |_| form.update(|f| f.seller_type = Some(SellerType::Professional))
                                />
                                "Professional"
                            </label>
                        </fieldset>
                        <label class="auth-label">
                            "Phone"
                            <input
                                class="auth-input"
                                type="tel"
                                autocomplete="tel"
                                prop:value=move || form.with(|f| f.phone.clone())
                                on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                            />
                        </label>
                        <label class="auth-label">
                            "WhatsApp (optional)"
                            <input
                                class="auth-input"
                                type="tel"
                                prop:value=move || form.with(|f| f.whatsapp.clone())
                                on:input=move |ev| form.update(|f| f.whatsapp = event_target_value(&ev))
                            />
                        </label>
                    </Show>
                    <Show when=is_pro>
                        <label class="auth-label">
                            "Company name"
                            <input
                                class="auth-input"
                                type="text"
                                autocomplete="organization"
                                prop:value=move || form.with(|f| f.company_name.clone())
                                on:input=move |ev| form.update(|f| f.company_name = event_target_value(&ev))
                            />
                        </label>
                    </Show>
                    <Show when=move || error.get().is_some()>
                        <p class="auth-error" role="alert">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <p class="auth-footer">
                    "Already registered? "
                    <A href=routes::LOGIN>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
