//! Toast notifications
//!
//! Every error is reported to the user through here rather than by
//! changing the screen.

use std::time::{Duration, Instant};

use super::commands::NotificationLevel;

pub const AUTO_DISMISS: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: usize,
    pub timestamp: Instant,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub auto_dismiss_after: Option<Duration>,
}

impl Notification {
    fn is_active(&self, now: Instant) -> bool {
        match self.auto_dismiss_after {
            Some(duration) => now.duration_since(self.timestamp) < duration,
            None => true,
        }
    }
}

pub struct NotificationManager {
    notifications: Vec<Notification>,
    next_id: usize,
    max_notifications: usize,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            next_id: 0,
            max_notifications: 20,
        }
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Error, title.into(), message.into())
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Success, title.into(), message.into())
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Warning, title.into(), message.into())
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Info, title.into(), message.into())
    }

    pub fn push(&mut self, level: NotificationLevel, title: String, message: String) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        self.notifications.push(Notification {
            id,
            timestamp: Instant::now(),
            level,
            title,
            message,
            auto_dismiss_after: Some(AUTO_DISMISS),
        });

        if self.notifications.len() > self.max_notifications {
            self.notifications.remove(0);
        }

        id
    }

    pub fn dismiss(&mut self, id: usize) {
        self.notifications.retain(|n| n.id != id);
    }

    /// Dismiss the newest visible toast
    pub fn dismiss_latest(&mut self) {
        if let Some(id) = self.get_active().first().map(|n| n.id) {
            self.dismiss(id);
        }
    }

    /// Newest first
    pub fn get_active(&self) -> Vec<&Notification> {
        let now = Instant::now();
        self.notifications
            .iter()
            .rev()
            .filter(|n| n.is_active(now))
            .collect()
    }

    pub fn cleanup_expired(&mut self) {
        let now = Instant::now();
        self.notifications.retain(|n| n.is_active(now));
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
