//! Toast banner state.
//!
//! One notice is shown at a time; a newer one replaces the older. Each notice
//! gets a sequence id so a delayed auto-dismiss cannot close its successor.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
            Self::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    next_id: u64,
    current: Option<Notice>,
}

impl Notices {
    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Show `message`, replacing whatever is showing. Returns its id.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(Notice { id: self.next_id, kind, message: message.into() });
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    /// Toast the outcome of a page action.
    pub fn report<E: Display>(&mut self, outcome: Result<String, E>) -> u64 {
        match outcome {
            Ok(message) => self.success(message),
            Err(err) => self.error(err.to_string()),
        }
    }

    /// Close notice `id` if it is still the one showing.
    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
        }
    }
}
