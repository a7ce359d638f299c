//! Notification sink that forwards user-facing messages to tracing.

use super::ports::{NoticeLevel, NotificationPort};

/// Notification sink for the CLI: messages become log events under the `notify` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(target: "notify", "{message}"),
            NoticeLevel::Warn => tracing::warn!(target: "notify", "{message}"),
            NoticeLevel::Error => tracing::error!(target: "notify", "{message}"),
        }
    }
}
