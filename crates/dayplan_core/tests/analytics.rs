use dayplan_core::{
    day_overview, estimate_productivity, habit_calendar_weeks, habit_overview, habit_streak,
    should_show_missed_reminder, weekly_stats, DateKey, EnergyPatch, FixedClock, HabitCategory,
    MemoryKeyValueStore, Mood, NewHabit, NewTask, Planner, ProductivityBand, SnapshotStorage,
};

fn today() -> DateKey {
    DateKey::parse("2026-10-17").unwrap()
}

#[test]
fn streak_reference_cases_through_planner() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = Planner::open(SnapshotStorage::new(&backend), FixedClock::on(today()));

    let empty = planner.add_habit(NewHabit::new("Empty", HabitCategory::Health));
    let only_today = planner.add_habit(NewHabit::new("Today", HabitCategory::Health));
    let two_days = planner.add_habit(NewHabit::new("Two", HabitCategory::Health));
    let only_yesterday = planner.add_habit(NewHabit::new("Yesterday", HabitCategory::Health));

    planner.toggle_habit(&only_today.id);
    planner.toggle_habit(&two_days.id);
    planner.toggle_habit_on(&two_days.id, today().days_before(1));
    planner.toggle_habit_on(&only_yesterday.id, today().days_before(1));

    let streak_of = |id: &str| habit_streak(planner.state().habit(id).unwrap(), today());
    assert_eq!(streak_of(&empty.id), 0);
    assert_eq!(streak_of(&only_today.id), 1);
    assert_eq!(streak_of(&two_days.id), 2);
    assert_eq!(streak_of(&only_yesterday.id), 1);
}

#[test]
fn brand_new_habit_shows_no_missed_reminder() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = Planner::open(SnapshotStorage::new(&backend), FixedClock::on(today()));
    let habit = planner.add_habit(NewHabit::new("Journal", HabitCategory::Learning));

    let stored = planner.state().habit(&habit.id).unwrap();
    assert!(!should_show_missed_reminder(stored, today()));
    assert!(!habit_overview(stored, today()).show_missed_reminder);

    let four_days_later = today().days_after(4);
    assert!(should_show_missed_reminder(stored, four_days_later));
}

#[test]
fn productivity_reference_values() {
    assert_eq!(estimate_productivity(100, Mood::MAX, 8.0), 100);
    assert_eq!(estimate_productivity(0, Mood::MIN, 0.0), 7);
}

#[test]
fn day_and_week_views_agree_on_todays_tasks() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = Planner::open(SnapshotStorage::new(&backend), FixedClock::on(today()));

    let done = planner.add_task(NewTask::new("Ship it").mit(true));
    planner.add_task(NewTask::new("Inbox zero"));
    planner.add_task(NewTask::new("Last week").on(today().days_before(7)));
    planner.toggle_task(&done.id);
    planner.set_energy(&EnergyPatch {
        sleep_hours: Some(8.0),
        mood: Mood::new(4),
        water_glasses: None,
    });

    let state = planner.state();
    let overview = day_overview(state, today());
    assert_eq!(overview.tasks.len(), 2);
    assert_eq!(overview.progress, 50);
    assert_eq!(overview.mits.len(), 1);
    // 35 * 4/5 + 30 + 35 * 0.5 = 75.5
    assert_eq!(overview.productivity, Some(76));
    assert_eq!(overview.productivity_band, Some(ProductivityBand::High));

    let weekly = weekly_stats(&state.tasks, &state.habits, &state.energy_logs, today());
    assert_eq!(weekly.total_tasks, 2);
    assert_eq!(weekly.completed_tasks, 1);
    assert_eq!(weekly.completion_rate, 50);
    assert_eq!(weekly.avg_mood, 4.0);
    assert_eq!(weekly.avg_sleep, 8.0);
    assert_eq!(weekly.days.last(), Some(&today()));
}

#[test]
fn calendar_marks_toggled_days() {
    let backend = MemoryKeyValueStore::new();
    let mut planner = Planner::open(SnapshotStorage::new(&backend), FixedClock::on(today()));
    let habit = planner.add_habit(NewHabit::new("Walk", HabitCategory::Health));
    planner.toggle_habit_on(&habit.id, today().days_before(10));

    let weeks = habit_calendar_weeks(planner.state().habit(&habit.id).unwrap(), 5, today());
    assert_eq!(weeks.len(), 5);
    let marked: Vec<DateKey> = weeks
        .iter()
        .flatten()
        .filter(|cell| cell.completed)
        .map(|cell| cell.date)
        .collect();
    assert_eq!(marked, vec![today().days_before(10)]);
}
