use leptos::prelude::*;
use leptos_router::components::A;
use marketplace::routes;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="status-page">
            <h1>"Page not found"</h1>
            <p>"The page you are looking for does not exist or has moved."</p>
            <A href=routes::HOME>"Back to listings"</A>
        </div>
    }
}
