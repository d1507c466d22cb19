//! Timed status line messages.

use std::time::{Duration, Instant};

/// How long a message stays before the status line reverts to its default text.
pub const STATUS_LIFETIME: Duration = Duration::from_secs(2);

/// A transient message shown in the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    text: String,
    is_error: bool,
    shown_at: Instant,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self::at(text, false, Instant::now())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::at(text, true, Instant::now())
    }

    pub(crate) fn at(text: impl Into<String>, is_error: bool, shown_at: Instant) -> Self {
        Self {
            text: text.into(),
            is_error,
            shown_at,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    #[inline]
    pub fn expires_at(&self) -> Instant {
        self.shown_at + STATUS_LIFETIME
    }

    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
