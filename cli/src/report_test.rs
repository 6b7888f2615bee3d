use marketplace::guard::{ForbiddenReason, Redirect};
use marketplace::{AccountType, AuthUser, SessionStatus};

use super::*;

fn message(sender: &str) -> Message {
    Message {
        id: "m-1".to_owned(),
        sender_id: sender.to_owned(),
        receiver_id: "u-2".to_owned(),
        content: "Still available?".to_owned(),
        created_at: "2024-05-17T09:30:00Z".to_owned(),
        read: true,
    }
}

#[test]
fn navigation_is_recorded_not_followed() {
    let events = TerminalEvents::new();
    assert_eq!(events.last_navigation(), None);
    events.navigate("/verify-otp?email=a%40b.com");
    events.navigate("/");
    assert_eq!(events.last_navigation().as_deref(), Some("/"));
}

#[test]
fn notices_are_tagged_by_kind() {
    assert_eq!(render_notice(&Notice::success("Welcome back!")), "[ok] Welcome back!");
    assert_eq!(render_notice(&Notice::error("Nope")), "[error] Nope");
}

#[test]
fn status_for_signed_out_and_signed_in() {
    let mut snapshot = SessionSnapshot { status: SessionStatus::Ready, user: None };
    assert_eq!(render_status(&snapshot), "signed out");

    snapshot.user = Some(AuthUser::from_account("u-1", "sam@example.com", "sam", AccountType::SellerPro, false));
    assert_eq!(render_status(&snapshot), "signed in as sam <sam@example.com> (unverified; roles: SELLER_PRO)");
}

#[test]
fn decisions_name_target_and_reason() {
    assert_eq!(render_decision("/", &GuardDecision::Render), "/: allowed");
    let forbidden = GuardDecision::Redirect(Redirect::Forbidden(ForbiddenReason::MissingPermission));
    assert_eq!(render_decision("/favorites", &forbidden), "/favorites: redirect to /forbidden (missing-permission)");
    let login = GuardDecision::Redirect(Redirect::Login { from: "/messages".to_owned() });
    assert_eq!(render_decision("/messages", &login), "/messages: redirect to /login (unauthenticated)");
}

#[test]
fn conversation_shows_unread_only_when_nonzero() {
    let mut conversation = ConversationSummary {
        user_id: "u-2".to_owned(),
        username: "alex".to_owned(),
        last_message: "See you".to_owned(),
        last_message_at: "2024-05-17T09:30:00Z".to_owned(),
        unread_count: 0,
    };
    assert_eq!(render_conversation(&conversation), "u-2\talex\tSee you");
    conversation.unread_count = 2;
    assert_eq!(render_conversation(&conversation), "u-2\talex [2 unread]\tSee you");
}

#[test]
fn own_messages_point_outward() {
    assert!(render_message(&message("u-1"), Some("u-1")).starts_with("> "));
    assert!(render_message(&message("u-2"), Some("u-1")).starts_with("< "));
    assert!(render_message(&message("u-1"), None).starts_with("< "));
}

#[test]
fn category_slug_is_optional() {
    let mut category = Category { id: "3".to_owned(), name: "Vehicles".to_owned(), slug: None };
    assert_eq!(render_category(&category), "3\tVehicles");
    category.slug = Some("vehicles".to_owned());
    assert_eq!(render_category(&category), "3\tVehicles (vehicles)");
}
