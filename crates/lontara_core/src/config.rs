//! Tunable constants for notification derivation and storage layout.
//!
//! # Invariants
//! - `NotificationPolicy::default()` reproduces the portal's shipped behavior.
//! - Storage keys are stable; changing them orphans existing user data.

use crate::model::event::EventKind;
use crate::model::user::UserRole;

/// Global key holding the shared event array.
pub const EVENT_LOG_KEY: &str = "globalAppEvents";
/// Prefix of each user's notification partition key.
pub const NOTIFICATION_KEY_PREFIX: &str = "userNotifications_";
/// Key holding saved AI chat conversations.
pub const CHAT_HISTORY_KEY: &str = "chatHistory";

pub const DEFAULT_MAX_NOTIFICATIONS: usize = 50;
pub const DEFAULT_RELATED_COURSE: &str = "Tana Toraja";

/// Rules applied by notification reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPolicy {
    /// Only sessions of this role receive notifications.
    pub qualifying_role: UserRole,
    /// Event category turned into notifications.
    pub event_kind: EventKind,
    /// Upper bound on the per-user list after reconciliation.
    pub max_notifications: usize,
    /// Value copied into `Notification::related_course`.
    pub related_course: String,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            qualifying_role: UserRole::Siswa,
            event_kind: EventKind::NewMaterialPublished,
            max_notifications: DEFAULT_MAX_NOTIFICATIONS,
            related_course: DEFAULT_RELATED_COURSE.to_string(),
        }
    }
}

impl NotificationPolicy {
    pub fn applies_to(&self, role: UserRole) -> bool {
        role == self.qualifying_role
    }
}
