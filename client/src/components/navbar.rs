//! Top navigation bar.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;
use marketplace::Session;

use crate::state::auth::{AuthSignals, display_name, nav_items};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthSignals>();
    let session = expect_context::<Arc<Session>>();
    let busy = RwSignal::new(false);

    let on_logout = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                session.logout().await;
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &session;
        }
    });

    view! {
        <nav class="navbar">
            <A href="/" attr:class="navbar__brand">"Marketplace"</A>
            <ul class="navbar__links">
                <For each=move || nav_items(&auth.snapshot.get()) key=|item| item.href.clone() let:item>
                    <li>
                        <A href=item.href>{item.label}</A>
                    </li>
                </For>
            </ul>
            <Show when=move || auth.snapshot.get().user.is_some()>
                <span class="navbar__user">{move || display_name(&auth.snapshot.get()).unwrap_or_default()}</span>
                <button
                    class="navbar__logout"
                    disabled=move || busy.get()
                    on:click=move |_| on_logout.run(())
                >
                    "Log out"
                </button>
            </Show>
        </nav>
    }
}
