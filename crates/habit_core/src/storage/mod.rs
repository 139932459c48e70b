//! Storage port for persisting the habit list.
//!
//! # Responsibility
//! - Define the load/save contract the service depends on.
//! - Encode the full habit list as one JSON blob under a fixed key.
//!
//! # Invariants
//! - `load` never fails outward: missing or corrupt data yields an empty list.
//! - `save` replaces the whole blob; there are no partial writes.

use crate::db::DbError;
use crate::model::habit::HabitRecord;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite_kv;

/// Key under which the serialized habit list is stored.
pub const HABITS_STORAGE_KEY: &str = "habit-tracker-data";

#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "habit storage backend failed: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize habits: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Persistence port for the full habit list.
pub trait HabitStorage {
    /// Loads all habits, falling back to an empty list on any fault.
    fn load(&self) -> Vec<HabitRecord>;
    /// Persists the full list, replacing what was stored before.
    fn save(&self, habits: &[HabitRecord]) -> Result<(), StorageError>;
}

impl<T: HabitStorage + ?Sized> HabitStorage for &T {
    fn load(&self) -> Vec<HabitRecord> {
        (**self).load()
    }

    fn save(&self, habits: &[HabitRecord]) -> Result<(), StorageError> {
        (**self).save(habits)
    }
}

pub(crate) fn encode_habits(habits: &[HabitRecord]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(habits)?)
}

/// Turns a raw backend read into a habit list, logging and masking faults.
pub(crate) fn decode_or_empty<E: Display>(
    backend: &'static str,
    raw: Result<Option<String>, E>,
) -> Vec<HabitRecord> {
    let blob = match raw {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("event=habits_load module=storage status=ok backend={backend} count=0 reason=empty");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=habits_load module=storage status=error backend={backend} error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HabitRecord>>(&blob) {
        Ok(habits) => {
            info!(
                "event=habits_load module=storage status=ok backend={backend} count={}",
                habits.len()
            );
            habits
        }
        Err(err) => {
            warn!(
                "event=habits_load module=storage status=error backend={backend} error_code=corrupt_blob bytes={} line={} column={}",
                blob.len(),
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}
