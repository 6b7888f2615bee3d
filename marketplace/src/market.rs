//! Token-authenticated marketplace data calls.
//!
//! Every call returns [`AuthError`] for transport failures, non-2xx
//! responses, and bodies that do not decode.

#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "market_test.rs"]
mod market_test;

use crate::error::AuthError;
use crate::fetch::{FetchClient, Method};
use crate::models::{
    Category, ConversationSummary, LISTING_PAGE_SIZE, Listing, ListingFilters, Message, SendMessage, UnreadCount,
    UpdateProfile, UserProfile,
};

pub const LISTINGS_PATH: &str = "/listings";
pub const CATEGORIES_PATH: &str = "/categories";
pub const PROFILE_PATH: &str = "/users/me/profile";
pub const MESSAGES_PATH: &str = "/messages";

#[must_use]
pub fn listings_path(filters: &ListingFilters, page: u32) -> String {
    format!("{LISTINGS_PATH}?{}", filters.query(page, LISTING_PAGE_SIZE))
}

#[must_use]
pub fn conversation_path(user_id: &str) -> String {
    format!("{MESSAGES_PATH}/{}", urlencoding::encode(user_id))
}

#[must_use]
pub fn message_path(message_id: &str) -> String {
    format!("{MESSAGES_PATH}/{}", urlencoding::encode(message_id))
}

#[must_use]
pub fn mark_read_path(user_id: &str) -> String {
    format!("{}/mark-read", conversation_path(user_id))
}

impl FetchClient {
    /// First page of recent listings matching `filters`.
    pub async fn recent_listings(&self, filters: &ListingFilters) -> Result<Vec<Listing>, AuthError> {
        self.get_json(&listings_path(filters, 1)).await
    }

    /// First page of listings with no filter.
    ///
    /// The backend has no view-count ordering yet, so this is the same page
    /// an unfiltered search returns.
    pub async fn most_viewed_listings(&self) -> Result<Vec<Listing>, AuthError> {
        self.get_json(&listings_path(&ListingFilters::default(), 1)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, AuthError> {
        self.get_json(CATEGORIES_PATH).await
    }

    pub async fn profile(&self) -> Result<UserProfile, AuthError> {
        self.get_json(PROFILE_PATH).await
    }

    pub async fn update_profile(&self, update: &UpdateProfile) -> Result<UserProfile, AuthError> {
        self.send_json(Method::Put, PROFILE_PATH, update).await
    }

    pub async fn conversations(&self) -> Result<Vec<ConversationSummary>, AuthError> {
        self.get_json(&format!("{MESSAGES_PATH}/conversations")).await
    }

    pub async fn unread_count(&self) -> Result<u32, AuthError> {
        let count: UnreadCount = self.get_json(&format!("{MESSAGES_PATH}/unread-count")).await?;
        Ok(count.count)
    }

    pub async fn conversation(&self, user_id: &str) -> Result<Vec<Message>, AuthError> {
        self.get_json(&conversation_path(user_id)).await
    }

    pub async fn send_message(&self, receiver_id: &str, content: &str) -> Result<Message, AuthError> {
        let body = SendMessage { receiver_id: receiver_id.to_owned(), content: content.to_owned() };
        self.send_json(Method::Post, MESSAGES_PATH, &body).await
    }

    pub async fn mark_conversation_read(&self, user_id: &str) -> Result<(), AuthError> {
        self.send_empty(Method::Patch, &mark_read_path(user_id)).await
    }

    pub async fn delete_message(&self, message_id: &str) -> Result<(), AuthError> {
        self.send_empty(Method::Delete, &message_path(message_id)).await
    }
}
