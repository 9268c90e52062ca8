//! Per-user notification partitions.
//!
//! # Invariants
//! - Partition key is `NOTIFICATION_KEY_PREFIX + display name`; users that
//!   share a display name share a partition.
//! - Loaded timestamps are parsed into `DateTime<Utc>`; entries whose
//!   timestamp cannot be parsed are skipped.

use crate::config::NOTIFICATION_KEY_PREFIX;
use crate::model::notification::Notification;
use crate::repo::{load_json_array, save_json_array, RepoResult};
use crate::storage::KeyValueStore;

/// Returns the storage key of `identity`'s notification partition.
pub fn notification_storage_key(identity: &str) -> String {
    format!("{NOTIFICATION_KEY_PREFIX}{identity}")
}

/// Repository interface for a user's saved notifications.
pub trait NotificationRepository {
    fn load_notifications(&self, identity: &str) -> Vec<Notification>;
    /// Replaces the whole saved list for `identity`.
    fn save_notifications(&self, identity: &str, items: &[Notification]) -> RepoResult<()>;
}

/// Notification partitions stored as JSON arrays in a key-value store.
pub struct KvNotificationRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvNotificationRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> NotificationRepository for KvNotificationRepository<S> {
    fn load_notifications(&self, identity: &str) -> Vec<Notification> {
        load_json_array(
            &self.store,
            &notification_storage_key(identity),
            "notification_repo",
        )
    }

    fn save_notifications(&self, identity: &str, items: &[Notification]) -> RepoResult<()> {
        save_json_array(&self.store, &notification_storage_key(identity), items)
    }
}
