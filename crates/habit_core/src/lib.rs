//! Core domain logic for the habit tracker.
//! This crate is the single source of truth for business invariants.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod stats;
pub mod storage;
pub mod store;

pub use calendar::{date_key_with_offset, last_n_days_ascending, today_key};
pub use config::{Config, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::habit::{
    Completions, DateKey, HabitCategory, HabitDraft, HabitId, HabitRecord, HabitValidationError,
};
pub use service::habit_service::{DayCompletion, HabitService, ServiceError, ServiceResult};
pub use stats::engine::{calculate_habit_stats, calculate_habit_stats_on, HabitStats};
pub use stats::overview::StatsOverview;
pub use stats::tier::{streak_tier, StreakTier};
pub use storage::memory::MemoryStorage;
pub use storage::sqlite_kv::SqliteKvStorage;
pub use storage::{HabitStorage, StorageError, HABITS_STORAGE_KEY};
pub use store::habit_store::{HabitStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
