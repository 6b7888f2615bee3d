//! Profile page: account details and contact preferences.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use marketplace::fetch::FetchClient;
use marketplace::models::{UpdateProfile, UserProfile};
use marketplace::Notice;

use crate::state::auth::AuthSignals;

const LOAD_FAILED: &str = "Your profile could not be loaded.";
const SAVE_FAILED: &str = "Your changes could not be saved.";
const SAVED: &str = "Profile updated.";

/// Editable contact fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub phone: String,
    pub whatsapp: String,
    pub show_phone: bool,
    pub show_whatsapp: bool,
}

impl ContactForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            phone: profile.phone.clone().unwrap_or_default(),
            whatsapp: profile.whatsapp.clone().unwrap_or_default(),
            show_phone: profile.show_phone,
            show_whatsapp: profile.show_whatsapp,
        }
    }

    /// Update body with only the fields that differ from `profile`.
    pub fn changes(&self, profile: &UserProfile) -> UpdateProfile {
        let original = Self::from_profile(profile);
        let text = |new: &str, old: &str| (new.trim() != old).then(|| new.trim().to_owned());
        UpdateProfile {
            phone: text(&self.phone, &original.phone),
            whatsapp: text(&self.whatsapp, &original.whatsapp),
            show_phone: (self.show_phone != original.show_phone).then_some(self.show_phone),
            show_whatsapp: (self.show_whatsapp != original.show_whatsapp).then_some(self.show_whatsapp),
            ..UpdateProfile::default()
        }
    }
}

/// "Member since" date (the day part of an RFC 3339 timestamp).
pub fn member_since(created_at: &str) -> &str {
    created_at.split_once('T').map_or(created_at, |(day, _)| day)
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let fetch = expect_context::<FetchClient>();
    let auth = expect_context::<AuthSignals>();
    let profile = RwSignal::new(None::<UserProfile>);
    let form = RwSignal::new(ContactForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let fetch = fetch.clone();
        leptos::task::spawn_local(async move {
            match fetch.profile().await {
                Ok(loaded) => {
                    form.set(ContactForm::from_profile(&loaded));
                    profile.set(Some(loaded));
                }
                Err(e) => {
                    log::warn!("profile: load failed: {e}");
                    error.set(Some(LOAD_FAILED.to_owned()));
                }
            }
        });
    }

    let on_save = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let Some(current) = profile.get() else {
            return;
        };
        let update = form.get().changes(&current);
        if update == UpdateProfile::default() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let fetch = fetch.clone();
            leptos::task::spawn_local(async move {
                match fetch.update_profile(&update).await {
                    Ok(saved) => {
                        form.set(ContactForm::from_profile(&saved));
                        profile.set(Some(saved));
                        auth.toasts.update(|t| {
                            t.push(Notice::success(SAVED));
                        });
                    }
                    Err(e) => {
                        auth.toasts.update(|t| {
                            t.push(Notice::error(e.user_message(SAVE_FAILED)));
                        });
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&fetch, &auth, update, SAVED, SAVE_FAILED, LOAD_FAILED);
        }
    });

    view! {
        <div class="profile-page">
            <Show when=move || error.get().is_some()>
                <p class="profile-page__error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                profile
                    .get()
                    .map(|p| {
                        view! {
                            <header class="profile-header">
                                <div class="profile-header__avatar">
                                    {match p.avatar_url.clone() {
                                        Some(src) => view! { <img src=src alt=""/> }.into_any(),
                                        None => view! { <span>{p.initial()}</span> }.into_any(),
                                    }}
                                </div>
                                <div>
                                    <h1>{p.username.clone()}</h1>
                                    <p class="profile-header__email">{p.email.clone()}</p>
                                    <p class="profile-header__status">{p.seller_status()}</p>
                                    <p class="profile-header__since">
                                        "Member since " {member_since(&p.created_at).to_owned()}
                                    </p>
                                    {p.company_name.clone().map(|name| view! { <p class="profile-header__company">{name}</p> })}
                                </div>
                            </header>
                        }
                    })
            }}
            <Show when=move || profile.with(Option::is_some)>
                <form
                    class="profile-form"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        on_save.run(());
                    }
                >
                    <h2>"Contact"</h2>
                    <label class="auth-label">
                        "Phone"
                        <input
                            class="auth-input"
                            type="tel"
                            prop:value=move || form.with(|f| f.phone.clone())
                            on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.show_phone)
                            on:change=move |ev| form.update(|f| f.show_phone = event_target_checked(&ev))
                        />
                        "Show my phone on listings"
                    </label>
                    <label class="auth-label">
                        "WhatsApp"
                        <input
                            class="auth-input"
                            type="tel"
                            prop:value=move || form.with(|f| f.whatsapp.clone())
                            on:input=move |ev| form.update(|f| f.whatsapp = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.show_whatsapp)
                            on:change=move |ev| form.update(|f| f.show_whatsapp = event_target_checked(&ev))
                        />
                        "Show my WhatsApp on listings"
                    </label>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>"Save"</button>
                </form>
            </Show>
        </div>
    }
}
