//! Public home page: filterable recent listings plus a most-viewed strip.
//!
//! SYSTEM CONTEXT
//! ==============
//! Readable without an account. Calls still go through the shared
//! `FetchClient`, so a signed-in visitor's token is attached when present.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use marketplace::fetch::FetchClient;
use marketplace::models::{Category, Listing, ListingFilters};

use crate::components::listing_card::ListingCard;

const LOAD_FAILED: &str = "Listings could not be loaded.";

/// Filter choices for the transaction type select: (wire value, label).
pub const TRANSACTION_CHOICES: [(&str, &str); 3] = [("", "Any"), ("achat", "For sale"), ("location", "For rent")];

/// Category options for the select, "All" first.
pub fn category_options(categories: &[Category]) -> Vec<(String, String)> {
    let mut options = vec![(String::new(), "All categories".to_owned())];
    options.extend(categories.iter().map(|c| (c.slug.clone().unwrap_or_else(|| c.id.clone()), c.name.clone())));
    options
}

#[component]
pub fn HomePage() -> impl IntoView {
    let fetch = expect_context::<FetchClient>();
    let draft = RwSignal::new(ListingFilters::default());
    let filters = RwSignal::new(ListingFilters::default());
    let recent = RwSignal::new(Vec::<Listing>::new());
    let most_viewed = RwSignal::new(Vec::<Listing>::new());
    let categories = RwSignal::new(Vec::<Category>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        let fetch = fetch.clone();
        leptos::task::spawn_local(async move {
            let (cats, popular) = futures::future::join(fetch.categories(), fetch.most_viewed_listings()).await;
            match cats {
                Ok(cats) => categories.set(cats),
                Err(e) => log::warn!("home: categories failed: {e}"),
            }
            match popular {
                Ok(items) => most_viewed.set(items),
                Err(e) => log::warn!("home: most viewed failed: {e}"),
            }
        });
    }

    Effect::new(move || {
        let current = filters.get();
        loading.set(true);
        #[cfg(feature = "hydrate")]
        {
            let fetch = fetch.clone();
            leptos::task::spawn_local(async move {
                match fetch.recent_listings(&current).await {
                    Ok(items) => {
                        recent.set(items);
                        error.set(None);
                    }
                    Err(e) => {
                        log::warn!("home: listings failed: {e}");
                        error.set(Some(LOAD_FAILED.to_owned()));
                    }
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&fetch, current, LOAD_FAILED);
        }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        filters.set(draft.get());
    };
    let on_reset = move |_| {
        draft.set(ListingFilters::default());
        filters.set(ListingFilters::default());
    };

    view! {
        <div class="home-page">
            <form class="filters" on:submit=on_search>
                <select
                    class="filters__field"
                    prop:value=move || draft.with(|d| d.category.clone())
                    on:change=move |ev| draft.update(|d| d.category = event_target_value(&ev))
                >
                    <For each=move || category_options(&categories.get()) key=|(value, _)| value.clone() let:option>
                        <option value=option.0>{option.1}</option>
                    </For>
                </select>
                <input
                    class="filters__field"
                    type="text"
                    placeholder="City"
                    prop:value=move || draft.with(|d| d.city.clone())
                    on:input=move |ev| draft.update(|d| d.city = event_target_value(&ev))
                />
                <input
                    class="filters__field"
                    type="number"
                    min="0"
                    placeholder="Min price"
                    prop:value=move || draft.with(|d| d.min_price.clone())
                    on:input=move |ev| draft.update(|d| d.min_price = event_target_value(&ev))
                />
                <input
                    class="filters__field"
                    type="number"
                    min="0"
                    placeholder="Max price"
                    prop:value=move || draft.with(|d| d.max_price.clone())
                    on:input=move |ev| draft.update(|d| d.max_price = event_target_value(&ev))
                />
                <select
                    class="filters__field"
                    prop:value=move || draft.with(|d| d.transaction_type.clone())
                    on:change=move |ev| draft.update(|d| d.transaction_type = event_target_value(&ev))
                >
                    {TRANSACTION_CHOICES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <button class="filters__submit" type="submit">"Search"</button>
                <Show when=move || !filters.with(ListingFilters::is_empty)>
                    <button class="filters__reset" type="button" on:click=on_reset>"Clear"</button>
                </Show>
            </form>

            <section class="listing-section">
                <h2>"Recent listings"</h2>
                <Show when=move || error.get().is_some()>
                    <p class="listing-section__error" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="listing-section__loading"><span class="spinner"></span></div> }
                >
                    <Show
                        when=move || !recent.with(Vec::is_empty)
                        fallback=|| view! { <p class="listing-section__empty">"No listings match these filters."</p> }
                    >
                        <div class="listing-grid">
                            <For each=move || recent.get() key=|listing| listing.id.clone() let:listing>
                                <ListingCard listing=listing/>
                            </For>
                        </div>
                    </Show>
                </Show>
            </section>

            <Show when=move || !most_viewed.with(Vec::is_empty)>
                <section class="listing-section">
                    <h2>"Most viewed"</h2>
                    <div class="listing-grid listing-grid--strip">
                        <For each=move || most_viewed.get() key=|listing| listing.id.clone() let:listing>
                            <ListingCard listing=listing/>
                        </For>
                    </div>
                </section>
            </Show>
        </div>
    }
}
