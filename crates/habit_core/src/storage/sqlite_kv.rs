//! SQLite-backed key-value storage adapter.
//!
//! # Responsibility
//! - Store the habit list blob in the `kv_store` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Exactly one row per key; saves upsert.

use super::{decode_or_empty, encode_habits, HabitStorage, StorageError, HABITS_STORAGE_KEY};
use crate::model::habit::HabitRecord;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

/// Habit storage over a borrowed, migrated SQLite connection.
pub struct SqliteKvStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteKvStorage<'conn> {
    /// Uses the default `habit-tracker-data` key.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, HABITS_STORAGE_KEY)
    }

    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Reads the raw value stored under this adapter's key.
    pub fn read_raw(&self) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()
    }

    /// Writes a raw value under this adapter's key.
    pub fn write_raw(&self, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.key.as_str(), value],
        )?;
        Ok(())
    }
}

impl HabitStorage for SqliteKvStorage<'_> {
    fn load(&self) -> Vec<HabitRecord> {
        decode_or_empty("sqlite", self.read_raw())
    }

    fn save(&self, habits: &[HabitRecord]) -> Result<(), StorageError> {
        let blob = encode_habits(habits)?;
        match self.write_raw(&blob) {
            Ok(()) => {
                info!(
                    "event=habits_save module=storage status=ok backend=sqlite count={} bytes={}",
                    habits.len(),
                    blob.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=habits_save module=storage status=error backend=sqlite error_code=write_failed error={err}"
                );
                Err(err.into())
            }
        }
    }
}
