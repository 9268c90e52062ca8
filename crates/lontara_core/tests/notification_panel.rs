use chrono::{Duration, TimeZone, Utc};
use lontara_core::service::notification_panel::EMPTY_PANEL_MESSAGE;
use lontara_core::{
    AppEvent, EventLogRepository, KvEventLog, KvNotificationRepository, MemoryKvStore,
    NotificationCenter, NotificationPanel, NotificationPolicy, NotificationRepository,
    PointerTarget, SessionUser, UserRole,
};

fn seeded_store(count: i64) -> MemoryKvStore {
    let store = MemoryKvStore::new();
    let log = KvEventLog::new(&store);
    let base = Utc.with_ymd_and_hms(2024, 10, 1, 7, 0, 0).unwrap();
    for idx in 0..count {
        log.append_event(&AppEvent::new_material(
            format!("materi {idx}"),
            base + Duration::hours(idx),
        ))
        .unwrap();
    }
    store
}

#[test]
fn opening_marks_all_read_without_changing_membership() {
    let store = seeded_store(3);
    let mut center = NotificationCenter::new(
        KvEventLog::new(&store),
        KvNotificationRepository::new(&store),
        NotificationPolicy::default(),
    );
    center.set_session(Some(SessionUser::new(UserRole::Siswa, "Andi", "s1")));
    let before: Vec<String> = center.notifications().iter().map(|n| n.id.clone()).collect();
    assert_eq!(center.unread_count(), 3);
    assert!(NotificationPanel::shows_badge(&center));

    let mut panel = NotificationPanel::new();
    panel.toggle_open(&mut center);

    assert!(panel.is_open());
    assert_eq!(center.unread_count(), 0);
    assert!(center.notifications().iter().all(|n| n.is_read));
    let after: Vec<String> = center.notifications().iter().map(|n| n.id.clone()).collect();
    assert_eq!(before, after);
    assert!(!NotificationPanel::shows_badge(&center));

    let persisted = KvNotificationRepository::new(&store).load_notifications("Andi");
    assert!(persisted.iter().all(|n| n.is_read));
}

#[test]
fn closing_does_not_touch_read_state() {
    let store = seeded_store(2);
    let mut center = NotificationCenter::new(
        KvEventLog::new(&store),
        KvNotificationRepository::new(&store),
        NotificationPolicy::default(),
    );
    center.set_session(Some(SessionUser::new(UserRole::Siswa, "Andi", "s1")));
    let mut panel = NotificationPanel::new();
    panel.toggle_open(&mut center);
    panel.toggle_open(&mut center);
    assert!(!panel.is_open());

    KvEventLog::new(&store)
        .append_event(&AppEvent::new_material(
            "baru",
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ))
        .unwrap();
    center.end_session();
    center.set_session(Some(SessionUser::new(UserRole::Siswa, "Andi", "s1")));
    assert_eq!(center.unread_count(), 1);

    panel.handle_pointer(PointerTarget::Outside);
    assert_eq!(center.unread_count(), 1);
}

#[test]
fn clear_all_empties_list_and_closes() {
    let store = seeded_store(4);
    let mut center = NotificationCenter::new(
        KvEventLog::new(&store),
        KvNotificationRepository::new(&store),
        NotificationPolicy::default(),
    );
    center.set_session(Some(SessionUser::new(UserRole::Siswa, "Andi", "s1")));
    let mut panel = NotificationPanel::new();
    panel.toggle_open(&mut center);

    panel.clear_all(&mut center);

    assert!(!panel.is_open());
    assert!(center.notifications().is_empty());
    assert!(KvNotificationRepository::new(&store)
        .load_notifications("Andi")
        .is_empty());
    assert!(NotificationPanel::rows(&center, Utc::now()).is_empty());
    assert_eq!(EMPTY_PANEL_MESSAGE, "Tidak ada notifikasi baru.");
}

#[test]
fn rows_carry_elapsed_labels_newest_first() {
    let store = seeded_store(3);
    let mut center = NotificationCenter::new(
        KvEventLog::new(&store),
        KvNotificationRepository::new(&store),
        NotificationPolicy::default(),
    );
    center.set_session(Some(SessionUser::new(UserRole::Siswa, "Andi", "s1")));

    let now = Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap();
    let rows = NotificationPanel::rows(&center, now);
    let labels: Vec<&str> = rows.iter().map(|row| row.elapsed.as_str()).collect();
    assert_eq!(labels, vec!["30 menit lalu", "1 jam lalu", "2 jam lalu"]);
    assert_eq!(rows[0].message, "Materi baru: \"materi 2\"");
}
