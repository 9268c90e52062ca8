//! Notification reconciliation.
//!
//! # Responsibility
//! - Merge qualifying events into a user's saved notifications.
//!
//! # Invariants
//! - Candidate identity is `notification_id_for(event.timestamp)`, so
//!   re-running over the same log never duplicates a notification.
//! - Output is sorted by timestamp descending with a stable sort; new
//!   candidates precede saved entries that share a timestamp.
//! - Output length never exceeds `NotificationPolicy::max_notifications`.
//! - `is_read` of saved entries is never touched.

use crate::config::NotificationPolicy;
use crate::model::event::AppEvent;
use crate::model::notification::{Notification, NotificationId};
use std::collections::HashSet;

/// Message shown for a newly published material.
pub fn new_material_message(title: &str) -> String {
    format!("Materi baru: \"{title}\"")
}

/// Maps one event to its notification when the policy recognizes it.
///
/// Returns `None` for other event kinds and for events without a string
/// `payload.title`.
pub fn notification_for_event(
    event: &AppEvent,
    policy: &NotificationPolicy,
) -> Option<Notification> {
    if event.kind != policy.event_kind {
        return None;
    }
    let title = event.title()?;
    Some(Notification::unread(
        new_material_message(title),
        event.timestamp,
        policy.related_course.as_str(),
    ))
}

/// Computes the authoritative notification list for one session.
pub fn reconcile(
    events: &[AppEvent],
    saved: Vec<Notification>,
    policy: &NotificationPolicy,
) -> Vec<Notification> {
    let mut known: HashSet<NotificationId> = saved.iter().map(|item| item.id.clone()).collect();

    // `insert` rejects both saved identities and repeats within this batch.
    let mut merged: Vec<Notification> = events
        .iter()
        .filter_map(|event| notification_for_event(event, policy))
        .filter(|candidate| known.insert(candidate.id.clone()))
        .collect();
    merged.extend(saved);

    merged.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
    merged.truncate(policy.max_notifications);
    merged
}
