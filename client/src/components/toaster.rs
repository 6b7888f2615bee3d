//! Toast host: renders queued notices and dismisses each after its duration.

use leptos::prelude::*;

use crate::state::auth::AuthSignals;
use crate::state::toast::{Toast, ToastState};

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<AuthSignals>().toasts;

    view! {
        <div class="toaster" role="status" aria-live="polite">
            <For each=move || toasts.get().items key=|toast| toast.id let:toast>
                <ToastItem toast=toast toasts=toasts/>
            </For>
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast, toasts: RwSignal<ToastState>) -> impl IntoView {
    let id = toast.id;

    #[cfg(feature = "hydrate")]
    {
        let delay = toast.notice.duration_ms;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay).await;
            toasts.update(|t| t.dismiss(id));
        });
    }

    view! {
        <div class=toast.class()>
            <span class="toast__message">{toast.notice.message.clone()}</span>
            <button
                class="toast__close"
                aria-label="Dismiss"
                on:click=move |_| toasts.update(|t| t.dismiss(id))
            >
                "✕"
            </button>
        </div>
    }
}
