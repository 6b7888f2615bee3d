//! Card for one listing in the home page grids.

use leptos::prelude::*;
use marketplace::models::{Listing, TransactionType};

fn transaction_badge(kind: Option<TransactionType>) -> Option<&'static str> {
    match kind? {
        TransactionType::Location => Some("For rent"),
        TransactionType::Achat => Some("For sale"),
    }
}

#[component]
pub fn ListingCard(listing: Listing) -> impl IntoView {
    let price = listing.price_label();
    let cover = listing.cover_image().map(str::to_owned);
    let badge = transaction_badge(listing.transaction_type);

    view! {
        <article class="listing-card">
            {cover.map(|src| view! { <img class="listing-card__image" src=src alt="" loading="lazy"/> })}
            {badge.map(|text| view! { <span class="listing-card__badge">{text}</span> })}
            <div class="listing-card__body">
                <h3 class="listing-card__title">{listing.title}</h3>
                <p class="listing-card__price">{price}</p>
                <p class="listing-card__meta">{listing.city}" · "{listing.category}</p>
            </div>
        </article>
    }
}
