use std::time::{Duration, Instant};

use crate::theme::notification::{self as colors, NotificationColors};

/// Determines style and how long the message stays up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationType {
    #[default]
    Info,
    Warning,
}

impl NotificationType {
    fn duration(self) -> Duration {
        match self {
            NotificationType::Info => Duration::from_millis(1500),
            NotificationType::Warning => Duration::from_secs(10),
        }
    }

    pub fn colors(self) -> &'static NotificationColors {
        match self {
            NotificationType::Info => &colors::INFO,
            NotificationType::Warning => &colors::WARNING,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: &str, kind: NotificationType) -> Self {
        Self {
            message: message.to_string(),
            kind,
            created_at: Instant::now(),
            duration: kind.duration(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// At most one notification is visible; a new one replaces the old
#[derive(Debug, Default)]
pub struct NotificationState {
    pub current: Option<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an info notification (1.5s)
    pub fn show(&mut self, message: &str) {
        self.current = Some(Notification::new(message, NotificationType::Info));
    }

    /// Show a warning notification (10s)
    pub fn show_warning(&mut self, message: &str) {
        self.current = Some(Notification::new(message, NotificationType::Warning));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Clear expired notification, returns true if cleared
    pub fn clear_if_expired(&mut self) -> bool {
        if let Some(notification) = &self.current
            && notification.is_expired()
        {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    #[cfg(test)]
    pub fn current_message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }
}

#[cfg(test)]
#[path = "notification_state_tests.rs"]
mod notification_state_tests;
