use std::time::{Duration, Instant};

pub const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient on-screen message; a newer one replaces the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), dismiss_after: DISMISS_AFTER }
    }

    pub fn success(message: impl Into<String>) -> Self { Self::new(NotificationKind::Success, message) }

    pub fn error(message: impl Into<String>) -> Self { Self::new(NotificationKind::Error, message) }

    pub fn info(message: impl Into<String>) -> Self { Self::new(NotificationKind::Info, message) }

    pub fn is_expired(&self, shown_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(shown_at) >= self.dismiss_after
    }
}

/// How a page reports an outcome to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Notify(Notification),
    /// Blocking dialog; used by the contact form for missing fields.
    Alert(String),
}
