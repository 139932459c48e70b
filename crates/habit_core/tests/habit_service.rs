use chrono::NaiveDate;
use habit_core::db::open_db_in_memory;
use habit_core::{
    HabitCategory, HabitDraft, HabitService, HabitStorage, HabitValidationError, MemoryStorage,
    ServiceError, SqliteKvStorage,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

#[test]
fn create_persists_and_reloads() {
    let conn = open_db_in_memory().unwrap();
    let habit_id = {
        let mut service = HabitService::new(SqliteKvStorage::new(&conn));
        service
            .create_habit(&HabitDraft::new("  Morning run ", HabitCategory::Health))
            .unwrap()
            .id
    };

    let service = HabitService::new(SqliteKvStorage::new(&conn));
    let habits = service.list();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].id, habit_id);
    assert_eq!(habits[0].name, "Morning run");
    assert!(habits[0].completions.is_empty());
}

#[test]
fn toggle_updates_stats_on_next_read() {
    let storage = MemoryStorage::new();
    let mut service = HabitService::new(&storage);
    let habit = service
        .create_habit(&HabitDraft::new("Journal", HabitCategory::Mindfulness))
        .unwrap();

    for key in ["2024-01-08", "2024-01-09", "2024-01-10"] {
        assert!(service.toggle_completion(habit.id, key).unwrap());
    }
    let stats = service.stats_on(habit.id, today()).unwrap();
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.total_completions, 3);

    assert!(!service.toggle_completion(habit.id, "2024-01-10").unwrap());
    let stats = service.stats_on(habit.id, today()).unwrap();
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 2);

    let persisted = storage.load();
    assert_eq!(persisted[0].completions.get("2024-01-10"), Some(&false));
}

#[test]
fn update_merges_fields_and_keeps_history() {
    let storage = MemoryStorage::new();
    let mut service = HabitService::new(&storage);
    let habit = service
        .create_habit(&HabitDraft::new("Sketch", HabitCategory::Creative))
        .unwrap();
    service.toggle_completion(habit.id, "2024-01-10").unwrap();

    let mut draft = HabitDraft::new("Sketch daily", HabitCategory::Learning);
    draft.color = "#123456".to_string();
    let updated = service.update_habit(habit.id, &draft).unwrap();

    assert_eq!(updated.id, habit.id);
    assert_eq!(updated.created_at, habit.created_at);
    assert_eq!(updated.category, HabitCategory::Learning);
    assert_eq!(updated.color, "#123456");
    assert!(updated.is_completed_on("2024-01-10"));
    assert_eq!(storage.load()[0].name, "Sketch daily");
}

#[test]
fn delete_removes_habit_from_store_and_storage() {
    let storage = MemoryStorage::new();
    let mut service = HabitService::new(&storage);
    let keep = service
        .create_habit(&HabitDraft::new("Keep", HabitCategory::Social))
        .unwrap();
    let drop_me = service
        .create_habit(&HabitDraft::new("Drop", HabitCategory::Social))
        .unwrap();

    service.delete_habit(drop_me.id).unwrap();

    assert!(service.get(drop_me.id).is_none());
    let persisted = storage.load();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, keep.id);
    assert_eq!(
        service.delete_habit(drop_me.id),
        Err(ServiceError::HabitNotFound(drop_me.id))
    );
}

#[test]
fn invalid_input_is_rejected_without_persisting() {
    let storage = MemoryStorage::new();
    let mut service = HabitService::new(&storage);

    assert_eq!(
        service.create_habit(&HabitDraft::new("   ", HabitCategory::Health)),
        Err(ServiceError::Validation(HabitValidationError::EmptyName))
    );
    assert!(storage.raw().is_none());

    let habit = service
        .create_habit(&HabitDraft::new("Valid", HabitCategory::Health))
        .unwrap();
    assert!(matches!(
        service.toggle_completion(habit.id, "10/01/2024"),
        Err(ServiceError::Validation(HabitValidationError::InvalidDateKey(_)))
    ));
    assert!(storage.load()[0].completions.is_empty());
}

#[test]
fn overview_aggregates_current_records() {
    let mut service = HabitService::new(MemoryStorage::new());
    assert_eq!(service.overview_on(today()).total_habits, 0);

    let a = service
        .create_habit(&HabitDraft::new("A", HabitCategory::Productivity))
        .unwrap();
    let b = service
        .create_habit(&HabitDraft::new("B", HabitCategory::Productivity))
        .unwrap();
    for key in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        service.toggle_completion(a.id, key).unwrap();
    }
    service.toggle_completion(b.id, "2024-01-10").unwrap();

    let overview = service.overview_on(today());
    assert_eq!(overview.total_habits, 2);
    assert_eq!(overview.total_completions, 4);
    assert_eq!(overview.best_streak, 3);
    // a: 3/30 = 10%, b: 1/30 = 3% -> mean 6.5 rounds to 7
    assert_eq!(overview.average_completion_rate, 7);
}

#[test]
fn corrupt_storage_starts_empty_and_recovers_on_save() {
    let storage = MemoryStorage::with_raw("]]garbage[[");
    let mut service = HabitService::new(&storage);
    assert!(service.list().is_empty());

    service
        .create_habit(&HabitDraft::new("Fresh start", HabitCategory::Health))
        .unwrap();
    assert!(!service.has_unsaved_changes());
    assert_eq!(storage.load().len(), 1);
}
