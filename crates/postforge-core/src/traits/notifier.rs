// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget notification sink.

use crate::types::Notification;

/// A side-effect sink for user-facing notices. Never fails, never blocks.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Forwards notifications to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        use crate::types::NotificationLevel;

        let Notification {
            level,
            title,
            message,
        } = notification;
        match level {
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!(%level, title = %title, "{message}")
            }
            NotificationLevel::Warning => tracing::warn!(title = %title, "{message}"),
            NotificationLevel::Error => tracing::error!(title = %title, "{message}"),
        }
    }
}
