//! Shown when a signed-in, verified user lacks the role or permission a page needs.

use leptos::prelude::*;
use leptos_router::components::A;
use marketplace::routes;

#[component]
pub fn ForbiddenPage() -> impl IntoView {
    view! {
        <div class="status-page">
            <h1>"Access denied"</h1>
            <p>"Your account does not have access to this page."</p>
            <A href=routes::HOME>"Back to listings"</A>
        </div>
    }
}
