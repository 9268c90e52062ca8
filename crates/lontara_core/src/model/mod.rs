//! Domain model shared by repositories and services.
//!
//! # Responsibility
//! - Define the wire shapes persisted in key-value storage.
//! - Keep timestamp encoding identical across events and notifications.
//!
//! # Invariants
//! - Persisted timestamps are ISO-8601 UTC strings with millisecond precision.
//! - Loaded timestamps are always `DateTime<Utc>`, never raw strings.

pub mod assessment;
pub mod chat;
pub mod event;
pub mod material;
pub mod notification;
pub mod timestamp;
pub mod user;
