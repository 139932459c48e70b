//! In-process storage adapter.
//!
//! Holds the serialized blob rather than live records so the same decode
//! path (including corrupt-data fallback) runs as for on-disk storage.

use super::{decode_or_empty, encode_habits, HabitStorage, StorageError};
use crate::model::habit::HabitRecord;
use std::cell::RefCell;
use std::convert::Infallible;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw blob, valid or not.
    pub fn with_raw(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
        }
    }

    /// Returns the currently stored raw blob.
    pub fn raw(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl HabitStorage for MemoryStorage {
    fn load(&self) -> Vec<HabitRecord> {
        decode_or_empty("memory", Ok::<_, Infallible>(self.raw()))
    }

    fn save(&self, habits: &[HabitRecord]) -> Result<(), StorageError> {
        let blob = encode_habits(habits)?;
        *self.blob.borrow_mut() = Some(blob);
        Ok(())
    }
}
