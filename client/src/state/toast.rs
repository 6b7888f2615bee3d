//! Toast queue for session and page notifications.
//!
//! DESIGN
//! ======
//! Plain data held in an `RwSignal<ToastState>`. Each toast carries its own
//! lifetime from the originating `Notice`; the toaster component schedules
//! the dismissal.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use marketplace::{Notice, NoticeKind};

/// Most toasts shown at once; older ones drop off first.
pub const MAX_VISIBLE: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

impl Toast {
    /// CSS modifier for the toast kind.
    pub fn class(&self) -> &'static str {
        match self.notice.kind {
            NoticeKind::Success => "toast toast--success",
            NoticeKind::Info => "toast toast--info",
            NoticeKind::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue `notice` and return the new toast's id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, notice });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    /// Remove toast `id`. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}
