//! Notifier that prints to the terminal.

use colored::*;

use super::{Notification, NotificationKind, Notifier};

/// Prints success notifications to stdout and errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    /// Formats a notification as a single line.
    pub fn format(notification: &Notification) -> String {
        match notification.kind {
            NotificationKind::Success => format!(
                "✅ {}: {}",
                notification.title.green().bold(),
                notification.description
            ),
            NotificationKind::Error => format!(
                "❌ {}: {}",
                notification.title.red().bold(),
                notification.description
            ),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = Self::format(&notification);
        match notification.kind {
            NotificationKind::Success => println!("{}", line),
            NotificationKind::Error => eprintln!("{}", line),
        }
    }
}
