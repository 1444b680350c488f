//! Buffered notification sink

use std::collections::VecDeque;

use gradebook_domain::Notification;
use parking_lot::Mutex;
use tracing::debug;

use super::ports::NotificationSink;

/// Holds notifications until the presentation layer drains them
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<VecDeque<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        self.pending.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&self, notification: Notification) {
        debug!(severity = %notification.severity, message = %notification.message, "notification");
        self.pending.lock().push_back(notification);
    }
}
