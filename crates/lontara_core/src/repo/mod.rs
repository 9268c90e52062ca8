//! Repositories over the key-value store.
//!
//! # Responsibility
//! - Own the JSON encoding of every persisted collection.
//! - Turn absent or corrupt stored values into empty collections.
//!
//! # Invariants
//! - Load paths never fail: unreadable data is logged and treated as empty.
//! - Write paths return `RepoError`; callers decide whether to drop it.

pub mod conversation_repo;
pub mod event_log;
pub mod notification_repo;

use crate::storage::{KeyValueStore, StoreError};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Write-side repository failure.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode stored value: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Reads `key` as a JSON array of `T`.
///
/// Absent key, read failure, invalid JSON or a non-array value yield an empty
/// list. Elements that fail to decode are skipped individually.
pub(crate) fn load_json_array<T, S>(store: &S, key: &str, module: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=store_read module={module} status=error key={key} error={err}");
            return Vec::new();
        }
    };

    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("event=store_read module={module} status=error key={key} error_code=not_an_array");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=store_read module={module} status=error key={key} error_code=malformed_json error={err}");
            return Vec::new();
        }
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<T>(item).ok())
        .collect();
    if decoded.len() != total {
        warn!(
            "event=store_read module={module} status=partial key={key} skipped={}",
            total - decoded.len()
        );
    }
    decoded
}

/// Reads `key` as a JSON array whose elements are kept byte-for-byte.
///
/// Absent key, read failure or a value that is not a JSON array yield an
/// empty list.
pub(crate) fn load_raw_array<S>(store: &S, key: &str, module: &str) -> Vec<Box<RawValue>>
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Box<RawValue>>>(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!("event=store_read module={module} status=error key={key} error_code=malformed_json error={err}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("event=store_read module={module} status=error key={key} error={err}");
            Vec::new()
        }
    }
}

/// Serializes `items` as a JSON array and writes it under `key`.
pub(crate) fn save_json_array<T, S>(store: &S, key: &str, items: &[T]) -> RepoResult<()>
where
    T: serde::Serialize,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(items)?;
    store.set(key, &encoded)?;
    Ok(())
}
