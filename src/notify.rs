//! Transient user-facing notifications.
//!
//! Every notification lives for a fixed time-to-live from the moment it is
//! pushed. Lifetimes are independent: pushing a duplicate message does not
//! renew an existing one, and the queue is not capped.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// Default lifetime of a notification.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// Identifier of a notification, unique within one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    /// Moment this notification disappears.
    pub fn expires_at(&self, ttl: Duration) -> Instant {
        self.created_at + ttl
    }
}

#[derive(Debug)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    ttl: Duration,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
            next_id: 1,
        }
    }

    /// Append a notification stamped with the current time.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> Notification {
        let notification = Notification {
            id: NotificationId(self.next_id),
            kind,
            message: message.into(),
            created_at: Instant::now(),
        };
        self.next_id += 1;
        self.items.push(notification.clone());
        notification
    }

    /// Live notifications, oldest first.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.items.iter().any(|n| n.id == id)
    }

    /// Remove every notification whose lifetime is over at `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<Notification> {
        let ttl = self.ttl;
        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|n| n.expires_at(ttl) <= now);
        self.items = live;
        expired
    }

    /// Earliest moment at which a notification expires.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.items.iter().map(|n| n.expires_at(self.ttl)).min()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
