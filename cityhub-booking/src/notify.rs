use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use cityhub_domain::notification::{Notification, Severity};

/// Ephemeral toast queue. Entries leave either by explicit dismissal or when
/// their display window lapses; dismissal never reorders the remainder.
pub struct NotificationCenter {
    items: Vec<Notification>,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    /// Enqueue a message, returning a copy for fan-out to live listeners.
    pub fn push(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification::new(severity, message, now);
        self.items.push(notification.clone());
        notification
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Remove exactly the entry with `id`. Returns false if it was already
    /// gone.
    pub fn dismiss(&mut self, id: &Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != *id);
        self.items.len() != before
    }

    /// Drop entries whose display window has lapsed. Returns the number
    /// removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items.retain(|n| now - n.created_at < ttl);
        before - self.items.len()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::seconds(5))
    }
}
