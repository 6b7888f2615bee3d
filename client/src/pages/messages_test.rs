use super::*;

fn message(id: &str, sender: &str) -> Message {
    Message {
        id: id.to_owned(),
        sender_id: sender.to_owned(),
        receiver_id: "other".to_owned(),
        content: "Still available?".to_owned(),
        created_at: "2024-05-17T09:30:00Z".to_owned(),
        read: false,
    }
}

fn summary(user_id: &str, username: &str, unread_count: u32) -> ConversationSummary {
    ConversationSummary {
        user_id: user_id.to_owned(),
        username: username.to_owned(),
        last_message: "Hello".to_owned(),
        last_message_at: "2024-05-17T09:30:00Z".to_owned(),
        unread_count,
    }
}

#[test]
fn own_messages_match_sender() {
    assert!(is_own(&message("m1", "u-1"), Some("u-1")));
    assert!(!is_own(&message("m1", "u-2"), Some("u-1")));
}

#[test]
fn nothing_is_own_when_signed_out() {
    assert!(!is_own(&message("m1", "u-1"), None));
}

#[test]
fn partner_name_falls_back_for_unknown_threads() {
    let list = [summary("u-2", "alex", 0)];
    assert_eq!(partner_name(&list, "u-2"), "alex");
    assert_eq!(partner_name(&list, "u-9"), "Conversation");
}

#[test]
fn marking_read_clears_one_conversation() {
    let mut list = vec![summary("u-2", "alex", 3), summary("u-3", "kim", 1)];
    assert_eq!(mark_read_locally(&mut list, "u-2"), 3);
    assert_eq!(list[0].unread_count, 0);
    assert_eq!(list[1].unread_count, 1);
    assert_eq!(mark_read_locally(&mut list, "u-2"), 0);
}

#[test]
fn marking_unknown_conversation_is_noop() {
    let mut list = vec![summary("u-2", "alex", 2)];
    assert_eq!(mark_read_locally(&mut list, "missing"), 0);
    assert_eq!(list[0].unread_count, 2);
}

#[test]
fn thread_links_nest_under_messages() {
    assert_eq!(thread_href("u-2"), "/messages/u-2");
}
