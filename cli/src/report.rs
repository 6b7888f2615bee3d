//! Terminal side of the session: notices on stderr, results on stdout.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use std::sync::{Mutex, PoisonError};

use marketplace::guard::GuardDecision;
use marketplace::models::{Category, ConversationSummary, Listing, Message};
use marketplace::{Notice, NoticeKind, SessionEvents, SessionSnapshot};

/// `SessionEvents` for a one-shot command.
///
/// Notices go to stderr. There is no router, so navigation requests are only
/// recorded; the command may print them as a hint.
#[derive(Debug, Default)]
pub struct TerminalEvents {
    last_navigation: Mutex<Option<String>>,
}

impl TerminalEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent path the session asked to navigate to.
    pub fn last_navigation(&self) -> Option<String> {
        self.last_navigation.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SessionEvents for TerminalEvents {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "session navigation");
        *self.last_navigation.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_owned());
    }

    fn notify(&self, notice: Notice) {
        eprintln!("{}", render_notice(&notice));
    }

    fn session_changed(&self, snapshot: &SessionSnapshot) {
        tracing::debug!(
            ready = snapshot.is_ready(),
            user = snapshot.user.as_ref().map_or("-", |u| u.email.as_str()),
            "session changed"
        );
    }
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Info => "info",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

/// One-line session summary for `status`.
pub fn render_status(snapshot: &SessionSnapshot) -> String {
    match &snapshot.user {
        None => "signed out".to_owned(),
        Some(user) => {
            let roles: Vec<&str> = user.roles.iter().map(|r| r.as_str()).collect();
            let verified = if user.email_verified { "verified" } else { "unverified" };
            format!("signed in as {} <{}> ({verified}; roles: {})", user.username, user.email, roles.join(", "))
        }
    }
}

/// Guard outcome for `can <path>`.
pub fn render_decision(path: &str, decision: &GuardDecision) -> String {
    match decision {
        GuardDecision::Render => format!("{path}: allowed"),
        GuardDecision::Pending => format!("{path}: pending"),
        GuardDecision::Redirect(redirect) => {
            format!("{path}: redirect to {} ({})", redirect.path(), redirect.reason())
        }
    }
}

pub fn render_listing(listing: &Listing) -> String {
    format!("{}\t{}\t{}\t{}", listing.id, listing.title, listing.price_label(), listing.city)
}

pub fn render_category(category: &Category) -> String {
    match &category.slug {
        Some(slug) => format!("{}\t{} ({slug})", category.id, category.name),
        None => format!("{}\t{}", category.id, category.name),
    }
}

pub fn render_conversation(conversation: &ConversationSummary) -> String {
    let unread = match conversation.unread_count {
        0 => String::new(),
        n => format!(" [{n} unread]"),
    };
    format!("{}\t{}{unread}\t{}", conversation.user_id, conversation.username, conversation.last_message)
}

/// Thread line, with the signed-in user's own messages marked `>`.
pub fn render_message(message: &Message, me: Option<&str>) -> String {
    let marker = if me == Some(message.sender_id.as_str()) { '>' } else { '<' };
    format!("{marker} {}  {}  ({})", message.created_at, message.content, message.id)
}
