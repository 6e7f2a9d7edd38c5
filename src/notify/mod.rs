//! User-facing notifications.
//!
//! Success, error and validation messages raised by the lookup session go
//! through a `Notifier`. The CLI prints them to the terminal; tests record them.

mod recording;
mod terminal;

pub use recording::RecordingNotifier;
pub use terminal::TerminalNotifier;

use crate::config::{TITLE_ERROR, TITLE_SUCCESS};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: TITLE_SUCCESS.to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: TITLE_ERROR.to_string(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Delivery channel for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
