//! Marketplace data DTOs (listings, categories, profile, messages).
//!
//! DESIGN
//! ======
//! One canonical shape per concept. Listing filters are keyed by
//! category/subcategory/city/region/price/transaction type; the backend's
//! snake_case field names are kept on the wire.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use serde::{Deserialize, Serialize};

use crate::rbac::AccountType;
use crate::user::SellerType;

/// Page size used by the home page listing grids.
pub const LISTING_PAGE_SIZE: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Rental.
    Location,
    /// Purchase.
    Achat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalPeriod {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub city: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub rental_period: Option<RentalPeriod>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Listing {
    /// Price label, with the rental period when the listing is a rental.
    #[must_use]
    pub fn price_label(&self) -> String {
        let amount = if self.price.fract() == 0.0 { format!("{:.0} €", self.price) } else { format!("{:.2} €", self.price) };
        match self.rental_period {
            Some(RentalPeriod::Day) => format!("{amount} / day"),
            Some(RentalPeriod::Week) => format!("{amount} / week"),
            Some(RentalPeriod::Month) => format!("{amount} / month"),
            Some(RentalPeriod::Year) => format!("{amount} / year"),
            None => amount,
        }
    }

    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Home page listing filters. Empty strings mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFilters {
    pub category: String,
    pub subcategory: String,
    pub city: String,
    pub region: String,
    pub min_price: String,
    pub max_price: String,
    pub transaction_type: String,
}

impl ListingFilters {
    /// Query string (without `?`) for page `page`, including only set filters.
    #[must_use]
    pub fn query(&self, page: u32, limit: u32) -> String {
        let mut params: Vec<(&str, String)> = vec![("page", page.to_string()), ("limit", limit.to_string())];
        let optional = [
            ("category", &self.category),
            ("subcategory", &self.subcategory),
            ("city", &self.city),
            ("region", &self.region),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
            ("transaction_type", &self.transaction_type),
        ];
        for (key, value) in optional {
            let value = value.trim();
            if !value.is_empty() {
                params.push((key, value.to_owned()));
            }
        }
        params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: String,
    pub dark_mode: bool,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub account_type: AccountType,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_seller: bool,
    #[serde(default)]
    pub seller_approved: bool,
    #[serde(default)]
    pub show_phone: bool,
    #[serde(default)]
    pub show_whatsapp: bool,
    pub company_name: Option<String>,
    pub seller_type: Option<SellerType>,
    pub siret: Option<String>,
    #[serde(default)]
    pub online: bool,
    pub banned_until: Option<String>,
    pub ban_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub last_sign_in_at: Option<String>,
    #[serde(default)]
    pub user_preferences: Vec<UserPreferences>,
}

impl UserProfile {
    /// Seller status line for the profile page.
    #[must_use]
    pub fn seller_status(&self) -> &'static str {
        match (self.is_seller, self.seller_approved) {
            (true, true) => "Approved seller",
            (true, false) => "Seller pending approval",
            (false, _) => "Buyer account",
        }
    }

    /// Upper-cased first letter of the username, for the avatar placeholder.
    #[must_use]
    pub fn initial(&self) -> String {
        self.username.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
    }
}

/// Partial profile update (`PUT /users/me/profile`); unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_phone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_whatsapp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    /// The other participant.
    pub user_id: String,
    pub username: String,
    pub last_message: String,
    pub last_message_at: String,
    pub unread_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

/// Body of `POST /messages`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SendMessage {
    pub receiver_id: String,
    pub content: String,
}

/// `GET /messages/unread-count`; the backend has used three spellings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UnreadCount {
    #[serde(default, rename = "unreadCount", alias = "unread_count", alias = "count")]
    pub count: u32,
}
