// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifications printed to the terminal.

use colored::Colorize;
use postforge_core::{Notification, NotificationLevel, Notifier};

/// Prints each notification as one line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", format_line(&notification));
    }
}

fn format_line(notification: &Notification) -> String {
    let label = match notification.level {
        NotificationLevel::Info => "info".blue(),
        NotificationLevel::Success => "ok".green(),
        NotificationLevel::Warning => "warning".yellow(),
        NotificationLevel::Error => "error".red(),
    };
    format!(
        "{} {}: {}",
        label.bold(),
        notification.title.bold(),
        notification.message
    )
}
