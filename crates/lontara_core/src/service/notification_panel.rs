//! Notification bell panel.
//!
//! # Invariants
//! - Opening the panel marks every notification read.
//! - Clearing empties the list and closes the panel.
//! - Any pointer interaction outside the panel closes it without touching
//!   read state.

use crate::model::notification::NotificationId;
use crate::repo::event_log::EventLogRepository;
use crate::repo::notification_repo::NotificationRepository;
use crate::service::elapsed::time_ago;
use crate::service::notification_service::NotificationCenter;
use chrono::{DateTime, Utc};

/// Text shown when the list is empty.
pub const EMPTY_PANEL_MESSAGE: &str = "Tidak ada notifikasi baru.";

/// Where a pointer-down landed relative to the panel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Inside,
    Outside,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub id: NotificationId,
    pub message: String,
    pub elapsed: String,
}

#[derive(Debug, Default)]
pub struct NotificationPanel {
    is_open: bool,
}

impl NotificationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Flips visibility; the closed-to-open transition marks all read.
    pub fn toggle_open<L, N>(&mut self, center: &mut NotificationCenter<L, N>)
    where
        L: EventLogRepository,
        N: NotificationRepository,
    {
        let opening = !self.is_open;
        self.is_open = opening;
        if opening {
            center.mark_all_read();
        }
    }

    pub fn clear_all<L, N>(&mut self, center: &mut NotificationCenter<L, N>)
    where
        L: EventLogRepository,
        N: NotificationRepository,
    {
        center.clear_all();
        self.is_open = false;
    }

    pub fn handle_pointer(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside {
            self.is_open = false;
        }
    }

    /// Whether the unread dot on the bell is visible.
    pub fn shows_badge<L, N>(center: &NotificationCenter<L, N>) -> bool
    where
        L: EventLogRepository,
        N: NotificationRepository,
    {
        center.unread_count() > 0
    }

    /// Rows with elapsed labels computed against `now`.
    pub fn rows<L, N>(center: &NotificationCenter<L, N>, now: DateTime<Utc>) -> Vec<PanelRow>
    where
        L: EventLogRepository,
        N: NotificationRepository,
    {
        center
            .notifications()
            .iter()
            .map(|item| PanelRow {
                id: item.id.clone(),
                message: item.message.clone(),
                elapsed: time_ago(item.timestamp, now),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationPanel, PointerTarget};
    use crate::config::NotificationPolicy;
    use crate::model::event::AppEvent;
    use crate::model::user::{SessionUser, UserRole};
    use crate::repo::event_log::{EventLogRepository, KvEventLog};
    use crate::repo::notification_repo::KvNotificationRepository;
    use crate::service::notification_service::NotificationCenter;
    use crate::storage::MemoryKvStore;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn outside_pointer_closes_and_inside_keeps_open() {
        let store = MemoryKvStore::new();
        let log = KvEventLog::new(&store);
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap();
        log.append_event(&AppEvent::new_material("Tongkonan", at))
            .unwrap();

        let mut center = NotificationCenter::new(
            log,
            KvNotificationRepository::new(&store),
            NotificationPolicy::default(),
        );
        center.set_session(Some(SessionUser::new(UserRole::Siswa, "Andi", "s1")));

        let mut panel = NotificationPanel::new();
        panel.toggle_open(&mut center);
        panel.handle_pointer(PointerTarget::Inside);
        assert!(panel.is_open());
        panel.handle_pointer(PointerTarget::Outside);
        assert!(!panel.is_open());

        let rows = NotificationPanel::rows(&center, at + Duration::hours(2));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].elapsed, "2 jam lalu");
        assert_eq!(rows[0].id, format!("notif-{}", at.timestamp_millis()));
    }
}
