//! Global domain events appended to the shared event log.
//!
//! # Invariants
//! - Events are immutable once appended.
//! - Unknown event types round-trip unchanged so other producers' entries
//!   survive a rewrite of the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Wire tag for "a new learning material was published".
pub const NEW_MATERIAL_EVENT_TYPE: &str = "NEW_MATERIAL_TANA_TORAJA";

/// Event category carried in the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    NewMaterialPublished,
    /// Any tag this build does not recognize.
    Other(String),
}

impl EventKind {
    pub fn as_wire(&self) -> &str {
        match self {
            Self::NewMaterialPublished => NEW_MATERIAL_EVENT_TYPE,
            Self::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        if value == NEW_MATERIAL_EVENT_TYPE {
            Self::NewMaterialPublished
        } else {
            Self::Other(value)
        }
    }
}

impl From<EventKind> for String {
    fn from(value: EventKind) -> Self {
        match value {
            EventKind::NewMaterialPublished => NEW_MATERIAL_EVENT_TYPE.to_string(),
            EventKind::Other(tag) => tag,
        }
    }
}

/// One entry of the global event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Variant-specific data, e.g. `{ "title": "..." }`.
    #[serde(default)]
    pub payload: Value,
    #[serde(with = "crate::model::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl AppEvent {
    /// Builds a `NEW_MATERIAL_TANA_TORAJA` event for a published material.
    pub fn new_material(title: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::NewMaterialPublished,
            payload: json!({ "title": title.into() }),
            timestamp: at,
        }
    }

    /// `payload.title` when present and a string.
    pub fn title(&self) -> Option<&str> {
        self.payload.get("title").and_then(Value::as_str)
    }
}
