//! Delivery targets for observer output

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use super::events::{Notification, NotificationMessage};

pub trait NotificationSink: Send + Sync {
    fn deliver(&self, message: NotificationMessage);
}

pub type SharedSink = Arc<dyn NotificationSink>;

/// Writes every notification to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn deliver(&self, message: NotificationMessage) {
        info!(
            id = %message.id,
            kind = message.notification.kind(),
            "\n{}",
            message.notification
        );
    }
}

/// Keeps delivered notifications in memory, in delivery order
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<NotificationMessage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.lock().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().iter().map(|m| m.notification.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain everything delivered so far
    pub fn take(&self) -> Vec<Notification> {
        self.lock()
            .drain(..)
            .map(|m| m.notification)
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<NotificationMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&self, message: NotificationMessage) {
        self.lock().push(message);
    }
}
