//! Per-user notifications derived from qualifying events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deterministic identity derived from the source event timestamp.
pub type NotificationId = String;

const NOTIFICATION_ID_PREFIX: &str = "notif-";

/// Derives the notification identity for an event created at `source`.
///
/// `id = "notif-" + <Unix epoch milliseconds>`. Two events sharing the same
/// millisecond share one identity.
pub fn notification_id_for(source: &DateTime<Utc>) -> NotificationId {
    format!("{NOTIFICATION_ID_PREFIX}{}", source.timestamp_millis())
}

/// Stored notification record. Field names follow the persisted camelCase
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    /// Rendered verbatim by the panel.
    pub message: String,
    #[serde(with = "crate::model::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    /// Informational tag only.
    #[serde(default)]
    pub related_course: String,
}

impl Notification {
    /// Creates an unread notification whose identity derives from `timestamp`.
    pub fn unread(
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
        related_course: impl Into<String>,
    ) -> Self {
        Self {
            id: notification_id_for(&timestamp),
            message: message.into(),
            timestamp,
            is_read: false,
            related_course: related_course.into(),
        }
    }
}
