//! Core domain logic for dayplan.
//! This crate is the single source of truth for planner state and analytics.

pub mod analytics;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use analytics::habits::{
    habit_calendar_weeks, habit_overview, habit_streak, should_show_missed_reminder, top_streaks,
    CalendarDay, HabitOverview, HabitStreak,
};
pub use analytics::productivity::{
    day_overview, energy_for_date, estimate_productivity, DayOverview, ProductivityBand,
};
pub use analytics::tasks::{
    daily_completion_series, daily_progress, mit_tasks, tasks_for_date, DayCompletion,
};
pub use analytics::weekly::{weekly_stats, WeeklyStats};
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{last_n_days, DateKey, DateKeyError};
pub use model::energy::{DailyEnergy, EnergyPatch, Mood};
pub use model::habit::{CompletionSet, Habit, HabitCategory, HabitPatch, NewHabit};
pub use model::new_entity_id;
pub use model::state::AppState;
pub use model::task::{NewTask, Priority, Task, TaskPatch};
pub use service::planner::Planner;
pub use storage::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SnapshotStorage, SqliteKeyValueStore,
    StorageError, StorageResult, DEFAULT_SNAPSHOT_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
