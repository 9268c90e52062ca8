//! Session-scoped notification state.
//!
//! # Responsibility
//! - Reconcile the active user's notifications when the session identity
//!   changes.
//! - Persist every change of the in-memory list to the user's partition.
//!
//! # Invariants
//! - Reconciliation runs once per identity transition, never on reads.
//! - Non-qualifying roles and signed-out sessions hold an empty list and
//!   never write to storage.
//! - Storage write failures are logged and dropped.

use crate::config::NotificationPolicy;
use crate::model::notification::Notification;
use crate::model::user::SessionUser;
use crate::repo::event_log::EventLogRepository;
use crate::repo::notification_repo::NotificationRepository;
use crate::service::reconcile::reconcile;
use log::{info, warn};
use std::time::Instant;

/// Owner of the active session's notification list.
pub struct NotificationCenter<L: EventLogRepository, N: NotificationRepository> {
    events: L,
    store: N,
    policy: NotificationPolicy,
    session: Option<SessionUser>,
    notifications: Vec<Notification>,
}

impl<L: EventLogRepository, N: NotificationRepository> NotificationCenter<L, N> {
    pub fn new(events: L, store: N, policy: NotificationPolicy) -> Self {
        Self {
            events,
            store,
            policy,
            session: None,
            notifications: Vec::new(),
        }
    }

    /// Switches the active session and reconciles when the identity changed.
    ///
    /// Passing the already-active user is a no-op. `None` signs out.
    pub fn set_session(&mut self, user: Option<SessionUser>) -> &[Notification] {
        if self.session == user {
            return &self.notifications;
        }
        self.session = user;

        let identity = self
            .session
            .as_ref()
            .filter(|user| self.policy.applies_to(user.role))
            .map(|user| user.name.clone());

        match identity {
            Some(identity) => {
                let started_at = Instant::now();
                let events = self.events.load_events();
                let saved = self.store.load_notifications(&identity);
                let saved_len = saved.len();
                let reconciled = reconcile(&events, saved, &self.policy);
                info!(
                    "event=notifications_reconcile module=notification_service status=ok events={} saved={} result={} duration_ms={}",
                    events.len(),
                    saved_len,
                    reconciled.len(),
                    started_at.elapsed().as_millis()
                );
                self.replace(reconciled);
            }
            None => self.notifications.clear(),
        }

        &self.notifications
    }

    /// Signs the current user out; their saved list stays in storage.
    pub fn end_session(&mut self) {
        self.set_session(None);
    }

    pub fn session(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    pub fn policy(&self) -> &NotificationPolicy {
        &self.policy
    }

    /// Current list, most recent first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|item| !item.is_read).count()
    }

    /// Marks every notification read, regardless of its current state.
    pub fn mark_all_read(&mut self) {
        let updated = self
            .notifications
            .iter()
            .cloned()
            .map(|mut item| {
                item.is_read = true;
                item
            })
            .collect();
        self.replace(updated);
    }

    /// Empties the list. Events stay in the global log.
    pub fn clear_all(&mut self) {
        self.replace(Vec::new());
    }

    fn replace(&mut self, items: Vec<Notification>) {
        self.notifications = items;
        self.persist();
    }

    fn persist(&self) {
        let Some(user) = self.session.as_ref() else {
            return;
        };
        if !self.policy.applies_to(user.role) {
            return;
        }

        if let Err(err) = self.store.save_notifications(&user.name, &self.notifications) {
            warn!(
                "event=notifications_save module=notification_service status=error count={} error={err}",
                self.notifications.len()
            );
        }
    }
}
