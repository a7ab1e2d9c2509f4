use dayplan_core::{
    daily_progress, AppState, DateKey, EnergyPatch, FixedClock, HabitCategory, HabitPatch,
    KeyValueStore, MemoryKeyValueStore, Mood, NewHabit, NewTask, Planner, Priority,
    SnapshotStorage, StorageError, StorageResult, TaskPatch, DEFAULT_SNAPSHOT_KEY,
};

fn today() -> DateKey {
    DateKey::parse("2026-10-17").unwrap()
}

fn open_planner(backend: &MemoryKeyValueStore) -> Planner<&MemoryKeyValueStore, FixedClock> {
    Planner::open(SnapshotStorage::new(backend), FixedClock::on(today()))
}

fn stored_state(backend: &MemoryKeyValueStore) -> AppState {
    let raw = backend.get(DEFAULT_SNAPSHOT_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Io(std::io::Error::other("storage offline")))
    }

    fn put(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Io(std::io::Error::other("quota exceeded")))
    }
}

#[test]
fn write_report_scenario_progress_goes_from_zero_to_hundred() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);

    let task = planner.add_task(NewTask::new("Write report"));
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.date, today());
    assert_eq!(daily_progress(&planner.state().tasks, today()), 0);

    assert!(planner.toggle_task(&task.id));
    assert_eq!(daily_progress(&planner.state().tasks, today()), 100);
}

#[test]
fn every_mutation_persists_the_full_snapshot() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);

    let task = planner.add_task(NewTask::new("Plan week").mit(true));
    assert_eq!(stored_state(&backend), *planner.state());

    let habit = planner.add_habit(NewHabit::new("Stretch", HabitCategory::Health));
    planner.toggle_habit(&habit.id);
    planner.set_energy(&EnergyPatch {
        water_glasses: Some(3),
        ..EnergyPatch::default()
    });
    planner.toggle_task(&task.id);
    assert_eq!(stored_state(&backend), *planner.state());
    assert!(planner.last_save_succeeded());

    let reopened = open_planner(&backend);
    assert_eq!(reopened.state(), planner.state());
}

#[test]
fn toggle_task_twice_restores_original_fields() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);
    let task = planner.add_task(NewTask::new("Review PR"));

    planner.toggle_task(&task.id);
    let completed = planner.state().task(&task.id).unwrap().clone();
    assert!(completed.completed);
    assert_eq!(completed.completed_at, Some(today().local_noon_epoch_ms()));

    planner.toggle_task(&task.id);
    assert_eq!(planner.state().task(&task.id), Some(&task));
}

#[test]
fn unknown_ids_are_silent_no_ops() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);
    planner.add_task(NewTask::new("Keep me"));
    let before = planner.state().clone();

    assert!(!planner.toggle_task("missing"));
    assert!(!planner.delete_task("missing"));
    assert!(!planner.update_task("missing", &TaskPatch::default()));
    assert!(!planner.toggle_habit("missing"));
    assert!(!planner.update_habit("missing", &HabitPatch::default()));
    assert!(!planner.delete_habit("missing"));
    assert_eq!(planner.state(), &before);
}

#[test]
fn add_task_honours_explicit_fields() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);
    let tomorrow = today().days_after(1);

    let task = planner.add_task(
        NewTask::new("Dentist")
            .with_description("10:30")
            .mit(true)
            .with_priority(Priority::High)
            .on(tomorrow),
    );
    assert_eq!(task.date, tomorrow);
    assert!(task.is_mit);
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.description.as_deref(), Some("10:30"));
    assert_eq!(task.created_at, today().local_noon_epoch_ms());
}

#[test]
fn update_and_delete_task_by_id() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);
    let first = planner.add_task(NewTask::new("First"));
    let second = planner.add_task(NewTask::new("Second"));

    assert!(planner.update_task(
        &first.id,
        &TaskPatch {
            title: Some("First, renamed".to_string()),
            is_mit: Some(true),
            ..TaskPatch::default()
        },
    ));
    let updated = planner.state().task(&first.id).unwrap();
    assert_eq!(updated.title, "First, renamed");
    assert!(updated.is_mit);
    assert_eq!(updated.priority, Priority::Medium);

    assert!(planner.delete_task(&first.id));
    let ids: Vec<&str> = planner.state().tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str()]);
}

#[test]
fn toggle_habit_twice_restores_completion_set_without_duplicates() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);
    let habit = planner.add_habit(NewHabit::new("Read", HabitCategory::Learning));
    assert_eq!(habit.icon, "⚡");
    assert_eq!(habit.target_days, 7);

    let yesterday = today().days_before(1);
    planner.toggle_habit(&habit.id);
    planner.toggle_habit_on(&habit.id, yesterday);
    let completions = &planner.state().habit(&habit.id).unwrap().completions;
    assert_eq!(completions.sorted(), vec![yesterday, today()]);

    planner.toggle_habit_on(&habit.id, yesterday);
    planner.toggle_habit_on(&habit.id, yesterday);
    assert_eq!(planner.state().habit(&habit.id).unwrap().completions.len(), 2);

    planner.toggle_habit(&habit.id);
    planner.toggle_habit_on(&habit.id, yesterday);
    assert!(planner.state().habit(&habit.id).unwrap().completions.is_empty());
}

#[test]
fn update_and_delete_habit() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);
    let habit = planner.add_habit(
        NewHabit::new("Pray", HabitCategory::Spiritual)
            .with_icon("🙏")
            .with_target_days(5),
    );

    assert!(planner.update_habit(
        &habit.id,
        &HabitPatch {
            category: Some(HabitCategory::Deepwork),
            target_days: Some(3),
            ..HabitPatch::default()
        },
    ));
    let updated = planner.state().habit(&habit.id).unwrap();
    assert_eq!(updated.category, HabitCategory::Deepwork);
    assert_eq!(updated.target_days, 3);
    assert_eq!(updated.icon, "🙏");

    assert!(planner.delete_habit(&habit.id));
    assert!(planner.state().habits.is_empty());
}

#[test]
fn set_energy_merges_cumulatively_with_one_entry_per_date() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = open_planner(&backend);
    let yesterday = today().days_before(1);
    planner.set_energy_on(
        yesterday,
        &EnergyPatch {
            sleep_hours: Some(5.0),
            ..EnergyPatch::default()
        },
    );

    let first = planner.set_energy(&EnergyPatch {
        sleep_hours: Some(8.5),
        ..EnergyPatch::default()
    });
    assert_eq!(first.mood, Mood::default());
    assert_eq!(first.water_glasses, 0);

    let second = planner.set_energy(&EnergyPatch {
        mood: Mood::new(5),
        water_glasses: Some(6),
        ..EnergyPatch::default()
    });
    assert_eq!(second.sleep_hours, 8.5);
    assert_eq!(second.mood, Mood::MAX);
    assert_eq!(second.water_glasses, 6);

    let logs = &planner.state().energy_logs;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs.iter().filter(|entry| entry.date == today()).count(), 1);
    assert_eq!(planner.state().energy_for(yesterday).unwrap().sleep_hours, 5.0);
}

#[test]
fn persistence_failure_keeps_mutation_in_memory() {
    let mut planner = Planner::open(SnapshotStorage::new(FailingStore), FixedClock::on(today()));
    assert!(planner.state().is_empty());

    let task = planner.add_task(NewTask::new("Offline task"));
    assert!(!planner.last_save_succeeded());
    assert_eq!(planner.state().tasks.len(), 1);
    assert!(planner.toggle_task(&task.id));
    assert!(planner.state().task(&task.id).unwrap().completed);
}

#[test]
fn corrupt_snapshot_opens_with_defaults_and_is_replaced_on_save() {
    let backend = MemoryKeyValueStore::new();
    backend
        .put(DEFAULT_SNAPSHOT_KEY, r#"{"tasks":[{"id":"x","date":"yesterday"}]}"#)
        .unwrap();

    let mut planner = open_planner(&backend);
    assert!(planner.state().is_empty());

    planner.add_task(NewTask::new("Fresh start"));
    assert_eq!(stored_state(&backend).tasks.len(), 1);
}
