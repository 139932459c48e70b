//! Habit use-case service.
//!
//! # Responsibility
//! - Load the record store from the storage port once at construction.
//! - Apply create/update/delete/toggle and persist the full list afterwards.
//! - Serve statistics as a read-side projection over current records.
//!
//! # Invariants
//! - In-memory state is authoritative; a failed save is logged and masked,
//!   never surfaced as a mutation error.
//! - Statistics are recomputed on every read.

use crate::calendar::{day_name, last_n_days_ending, today};
use crate::model::habit::{DateKey, HabitDraft, HabitId, HabitRecord, HabitValidationError};
use crate::stats::engine::{calculate_habit_stats_on, HabitStats};
use crate::stats::overview::StatsOverview;
use crate::storage::HabitStorage;
use crate::store::habit_store::{HabitStore, StoreError};
use chrono::{NaiveDate, Utc};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const WEEK_DAYS: usize = 7;

/// Service error for habit use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed field or date-key validation.
    Validation(HabitValidationError),
    /// Target habit does not exist.
    HabitNotFound(HabitId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::HabitNotFound(id) => write!(f, "habit not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::HabitNotFound(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            StoreError::NotFound(id) => Self::HabitNotFound(id),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// One cell of the weekly completion grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCompletion {
    pub date_key: DateKey,
    pub day_name: &'static str,
    pub completed: bool,
}

/// Habit service facade over a storage port.
pub struct HabitService<S: HabitStorage> {
    storage: S,
    store: HabitStore,
    unsaved_changes: bool,
}

impl<S: HabitStorage> HabitService<S> {
    /// Loads existing habits from `storage`.
    pub fn new(storage: S) -> Self {
        let store = HabitStore::from_records(storage.load());
        info!(
            "event=service_init module=service status=ok habit_count={}",
            store.len()
        );
        Self {
            storage,
            store,
            unsaved_changes: false,
        }
    }

    /// Returns whether the last persistence attempt failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn get(&self, id: HabitId) -> Option<&HabitRecord> {
        self.store.get(id)
    }

    /// Lists habits in creation order.
    pub fn list(&self) -> Vec<HabitRecord> {
        self.store.snapshot()
    }

    pub fn create_habit(&mut self, draft: &HabitDraft) -> ServiceResult<HabitRecord> {
        let record = self.store.create(draft, Utc::now())?;
        info!(
            "event=habit_create module=service status=ok habit_id={} category={}",
            record.id, record.category
        );
        self.persist();
        Ok(record)
    }

    pub fn update_habit(&mut self, id: HabitId, draft: &HabitDraft) -> ServiceResult<HabitRecord> {
        let record = self.store.update(id, draft)?;
        info!("event=habit_update module=service status=ok habit_id={id}");
        self.persist();
        Ok(record)
    }

    pub fn delete_habit(&mut self, id: HabitId) -> ServiceResult<HabitRecord> {
        let record = self.store.delete(id)?;
        info!("event=habit_delete module=service status=ok habit_id={id}");
        self.persist();
        Ok(record)
    }

    /// Flips completion at `date_key` and returns the new flag.
    pub fn toggle_completion(&mut self, id: HabitId, date_key: &str) -> ServiceResult<bool> {
        let completed = self.store.toggle_completion(id, date_key)?;
        info!(
            "event=habit_toggle module=service status=ok habit_id={id} date={date_key} completed={completed}"
        );
        self.persist();
        Ok(completed)
    }

    /// Statistics for one habit as of the local calendar date.
    pub fn stats(&self, id: HabitId) -> ServiceResult<HabitStats> {
        self.stats_on(id, today())
    }

    pub fn stats_on(&self, id: HabitId, today: NaiveDate) -> ServiceResult<HabitStats> {
        let record = self.store.get(id).ok_or(ServiceError::HabitNotFound(id))?;
        Ok(calculate_habit_stats_on(&record.completions, today))
    }

    pub fn overview(&self) -> StatsOverview {
        self.overview_on(today())
    }

    pub fn overview_on(&self, today: NaiveDate) -> StatsOverview {
        StatsOverview::from_habits(&self.store.snapshot(), today)
    }

    /// Last seven days for one habit, oldest first.
    pub fn week(&self, id: HabitId) -> ServiceResult<Vec<DayCompletion>> {
        self.week_on(id, today())
    }

    pub fn week_on(&self, id: HabitId, today: NaiveDate) -> ServiceResult<Vec<DayCompletion>> {
        let record = self.store.get(id).ok_or(ServiceError::HabitNotFound(id))?;
        Ok(last_n_days_ending(today, WEEK_DAYS)
            .into_iter()
            .map(|date_key| DayCompletion {
                day_name: day_name(&date_key).unwrap_or("?"),
                completed: record.is_completed_on(&date_key),
                date_key,
            })
            .collect())
    }

    fn persist(&mut self) {
        match self.storage.save(&self.store.snapshot()) {
            Ok(()) => self.unsaved_changes = false,
            Err(err) => {
                self.unsaved_changes = true;
                error!(
                    "event=habits_persist module=service status=error error_code=save_failed error={err}"
                );
            }
        }
    }
}
