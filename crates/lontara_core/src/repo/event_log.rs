//! Append-only global event log.
//!
//! # Responsibility
//! - Persist cross-user domain events under `EVENT_LOG_KEY`.
//!
//! # Invariants
//! - The read path never mutates or deletes events.
//! - Appends keep every stored element verbatim, including entries the typed
//!   read path cannot decode.
//! - The log only grows; there is no compaction.
//! - Concurrent writers are not coordinated; the last full rewrite wins.

use crate::config::EVENT_LOG_KEY;
use crate::model::event::AppEvent;
use crate::repo::{load_json_array, load_raw_array, save_json_array, RepoResult};
use crate::storage::KeyValueStore;
use log::debug;

/// Repository interface for the shared event log.
pub trait EventLogRepository {
    /// Loads the whole log; corrupt or absent storage yields an empty list.
    fn load_events(&self) -> Vec<AppEvent>;
    /// Reads the current log, appends `event` and writes the log back.
    fn append_event(&self, event: &AppEvent) -> RepoResult<()>;
}

/// Event log stored as one JSON array in a key-value store.
pub struct KvEventLog<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvEventLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> EventLogRepository for KvEventLog<S> {
    fn load_events(&self) -> Vec<AppEvent> {
        load_json_array(&self.store, EVENT_LOG_KEY, "event_log")
    }

    fn append_event(&self, event: &AppEvent) -> RepoResult<()> {
        let mut events = load_raw_array(&self.store, EVENT_LOG_KEY, "event_log");
        events.push(serde_json::value::to_raw_value(event)?);
        save_json_array(&self.store, EVENT_LOG_KEY, &events)?;
        debug!(
            "event=event_append module=event_log status=ok type={} log_len={}",
            event.kind.as_wire(),
            events.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EventLogRepository, KvEventLog};
    use crate::config::EVENT_LOG_KEY;
    use crate::model::event::{AppEvent, EventKind};
    use crate::storage::{KeyValueStore, MemoryKvStore};
    use chrono::{TimeZone, Utc};
    use serde_json::value::RawValue;

    #[test]
    fn append_preserves_existing_and_unknown_entries() {
        let store = MemoryKvStore::new();
        store
            .set(
                EVENT_LOG_KEY,
                r#"[{"type":"ASSESSMENT_CREATED","payload":{"id":7},"timestamp":"2024-01-01T00:00:00.000Z"}]"#,
            )
            .unwrap();
        let log = KvEventLog::new(&store);

        let at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        log.append_event(&AppEvent::new_material("Tongkonan", at))
            .unwrap();

        let events = log.load_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Other("ASSESSMENT_CREATED".to_string()));
        assert_eq!(events[1].title(), Some("Tongkonan"));
    }

    #[test]
    fn append_keeps_undecodable_entries_verbatim() {
        let first = r#"{"type":"ASSESSMENT_CREATED","payload":{"id":7}}"#;
        let second = r#"{"type":"NEW_MATERIAL_TANA_TORAJA","payload":{"title":"X"},"timestamp":"2024-01-01T10:00:00+02:00"}"#;
        let store = MemoryKvStore::new();
        store
            .set(EVENT_LOG_KEY, &format!("[{first},{second}]"))
            .unwrap();
        let log = KvEventLog::new(&store);

        let at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        log.append_event(&AppEvent::new_material("Tongkonan", at))
            .unwrap();

        let raw = store.get(EVENT_LOG_KEY).unwrap().unwrap();
        let stored: Vec<Box<RawValue>> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].get(), first);
        assert_eq!(stored[1].get(), second);

        let events = log.load_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].title(), Some("Tongkonan"));
    }

    #[test]
    fn corrupt_log_is_replaced_on_next_append() {
        let store = MemoryKvStore::new();
        store.set(EVENT_LOG_KEY, "{not json").unwrap();
        let log = KvEventLog::new(&store);
        assert!(log.load_events().is_empty());

        let at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        log.append_event(&AppEvent::new_material("Rambu Solo", at))
            .unwrap();
        assert_eq!(log.load_events().len(), 1);
    }
}
