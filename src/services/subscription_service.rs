use std::collections::HashSet;

use tokio::sync::Mutex;
use tracing::info;

use crate::models::SubscriberId;

/// In-memory set of recipients for the daily alert
///
/// Mutations are serialized by a single mutex; state lives as long as the
/// process.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<HashSet<SubscriberId>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`. Returns false if it was already subscribed.
    pub async fn subscribe(&self, id: SubscriberId) -> bool {
        let added = self.subscribers.lock().await.insert(id);
        if added {
            info!("Subscribed: {}", id);
        }
        added
    }

    /// Remove `id` if present. Removing an unknown id is a no-op.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        if self.subscribers.lock().await.remove(&id) {
            info!("Unsubscribed: {}", id);
        }
    }

    #[cfg(test)]
    pub async fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.lock().await.contains(&id)
    }

    /// Snapshot of the current subscribers
    pub async fn list_all(&self) -> Vec<SubscriberId> {
        self.subscribers.lock().await.iter().copied().collect()
    }

    pub async fn len(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.subscribers.lock().await.is_empty()
    }
}
