//! Notifier that forwards notifications to the `tracing` log stream.

use super::{Notification, NotificationLevel, Notifier};
use tracing::{info, warn};

/// Writes each notification as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level() {
            NotificationLevel::Info => info!(
                title = notification.title(),
                description = notification.description(),
                "notification"
            ),
            NotificationLevel::Destructive => warn!(
                title = notification.title(),
                description = notification.description(),
                "notification"
            ),
        }
    }
}
