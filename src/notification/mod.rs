//! User-facing notifications.
//!
//! Every failure path in the application surfaces a short title and
//! description pair through the [`Notifier`] port. Presentation layers decide
//! how to render them; the library only produces them.

mod memory;
mod tracing_notifier;

pub use memory::RecordingNotifier;
pub use tracing_notifier::TracingNotifier;

use std::fmt;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    /// Neutral information, such as a pending email confirmation.
    Info,
    /// A failed operation the user should know about.
    Destructive,
}

/// A title and description pair shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    title: String,
    description: String,
    level: NotificationLevel,
}

impl Notification {
    /// Creates an informational notification.
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NotificationLevel::Info,
        }
    }

    /// Creates a notification for a failed operation.
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl fmt::Display) -> Self {
        Self {
            title: title.into(),
            description: description.to_string(),
            level: NotificationLevel::Destructive,
        }
    }

    /// Returns the notification title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the notification description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the notification level.
    #[must_use]
    pub const fn level(&self) -> NotificationLevel {
        self.level
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Delivers a notification to the user.
    fn notify(&self, notification: Notification);
}
