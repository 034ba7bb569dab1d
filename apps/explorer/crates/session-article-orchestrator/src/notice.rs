//! Blocking notifications for the shell.

use serde::Serialize;

pub const SIGN_IN_FAILED: &str =
    "Sign in failed. Please check your email and password and try again.";
pub const SIGN_UP_FAILED: &str = "Sign up failed. Please try again or use a different email.";
pub const SAVE_FAILED: &str = "We couldn't save this article. Please try again.";
pub const DELETE_FAILED: &str = "We couldn't remove this article. Please try again.";
pub const LOAD_SAVED_FAILED: &str = "We couldn't load your saved articles.";
pub const REMEMBER_SESSION_FAILED: &str =
    "You're signed in, but we couldn't remember this session for next time.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Auth,
    Storage,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Auth,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Storage,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Auth => "Authentication",
            NoticeKind::Storage => "Saved articles",
        }
    }
}
