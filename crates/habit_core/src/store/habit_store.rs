//! Habit record store keyed by stable ID.
//!
//! # Invariants
//! - `order` and `records` always hold the same set of IDs.
//! - Listing order is insertion (creation) order.

use crate::model::habit::{HabitDraft, HabitId, HabitRecord, HabitValidationError};
use chrono::{DateTime, Utc};
use log::warn;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(HabitValidationError),
    NotFound(HabitId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<HabitValidationError> for StoreError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HabitStore {
    records: HashMap<HabitId, HabitRecord>,
    order: Vec<HabitId>,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded list. Records failing validation are
    /// dropped, and later duplicates of an ID are dropped so the first
    /// persisted record wins.
    pub fn from_records(records: impl IntoIterator<Item = HabitRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            if let Err(err) = record.validate() {
                warn!(
                    "event=store_load module=store status=skip reason=invalid_record habit_id={} error={err}",
                    record.id
                );
                continue;
            }
            if store.records.contains_key(&record.id) {
                warn!(
                    "event=store_load module=store status=skip reason=duplicate_id habit_id={}",
                    record.id
                );
                continue;
            }
            store.order.push(record.id);
            store.records.insert(record.id, record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: HabitId) -> Option<&HabitRecord> {
        self.records.get(&id)
    }

    /// Iterates records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &HabitRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Returns an owned copy of all records in creation order.
    pub fn snapshot(&self) -> Vec<HabitRecord> {
        self.iter().cloned().collect()
    }

    /// Appends a new habit with empty completion history.
    pub fn create(
        &mut self,
        draft: &HabitDraft,
        created_at: DateTime<Utc>,
    ) -> StoreResult<HabitRecord> {
        let record = HabitRecord::new(draft.normalized()?, created_at);
        self.order.push(record.id);
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    /// Field-merges name/category/color into an existing habit.
    pub fn update(&mut self, id: HabitId, draft: &HabitDraft) -> StoreResult<HabitRecord> {
        let draft = draft.normalized()?;
        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.apply_draft(draft);
        Ok(record.clone())
    }

    /// Removes a habit and returns it.
    pub fn delete(&mut self, id: HabitId) -> StoreResult<HabitRecord> {
        let record = self.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.order.retain(|existing| *existing != id);
        Ok(record)
    }

    /// Flips the completion flag at `date_key`; returns the new value.
    pub fn toggle_completion(&mut self, id: HabitId, date_key: &str) -> StoreResult<bool> {
        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        Ok(record.toggle_completion(date_key)?)
    }
}
