//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose planner mutations and read views to Dart via FRB.
//! - Validate presentation input (non-empty text, enum labels, date keys)
//!   before it reaches the core.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call runs load -> mutate -> save under one process-wide lock.
//! - Unknown IDs are reported as `ok=true` with no ID; nothing changes.

use dayplan_core::db::open_db;
use dayplan_core::{
    core_version as core_version_inner, day_overview, habit_calendar_weeks, habit_overview,
    init_logging as init_logging_inner, ping as ping_inner, weekly_stats, DateKey, EnergyPatch,
    HabitCategory, HabitPatch, Mood, NewHabit, NewTask, Planner, Priority, SnapshotStorage,
    SqliteKeyValueStore, SystemClock, Task, TaskPatch,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const PLANNER_DB_FILE_NAME: &str = "dayplan.sqlite3";
const HABIT_CALENDAR_WEEKS: u32 = 5;
static PLANNER_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static PLANNER_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope for planner mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerActionResponse {
    /// Whether input was accepted.
    pub ok: bool,
    /// ID of the created or changed entity; `None` for failures and no-ops.
    pub id: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl PlannerActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }

    fn from_applied(applied: bool, id: String, what: &str, verb: &str) -> Self {
        if applied {
            Self::success(format!("{what} {verb}."), id)
        } else {
            Self::unchanged(format!("No matching {}; nothing changed.", what.to_lowercase()))
        }
    }
}

/// Task row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub is_mit: bool,
    /// `high|medium|low`.
    pub priority: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

/// Today view: tasks, progress and energy.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayResponse {
    pub date: String,
    pub progress: u8,
    pub tasks: Vec<TaskItem>,
    pub mit_ids: Vec<String>,
    pub sleep_hours: Option<f64>,
    pub mood: Option<u8>,
    pub water_glasses: Option<u32>,
    pub productivity: Option<u8>,
    /// `high|medium|low` when `productivity` is set.
    pub productivity_band: Option<String>,
    pub message: String,
}

/// Habit card row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitItem {
    pub id: String,
    pub name: String,
    /// `health|deepwork|learning|spiritual`.
    pub category: String,
    pub icon: String,
    pub streak: u32,
    pub done_today: bool,
    pub show_missed_reminder: bool,
    pub show_streak_badge: bool,
    pub completed_this_week: u32,
    pub target_days: u8,
    /// Last `HABIT_CALENDAR_WEEKS` weeks, oldest week first; the last cell
    /// is today.
    pub calendar: Vec<Vec<CalendarDayItem>>,
}

/// One cell of the habit calendar grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDayItem {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitsResponse {
    pub items: Vec<HabitItem>,
    pub message: String,
}

/// One bar of the weekly completion chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCompletionItem {
    pub date: String,
    pub rate: u8,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakItem {
    pub habit_id: String,
    pub streak: u32,
}

/// Weekly summary view.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyResponse {
    /// Oldest first; last entry is today.
    pub days: Vec<String>,
    pub completion_rate: u8,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub avg_mood: f64,
    pub avg_sleep: f64,
    pub daily: Vec<DailyCompletionItem>,
    pub top_streaks: Vec<StreakItem>,
    pub message: String,
}

/// Adds a task.
///
/// # FFI contract
/// - `title` must be non-empty after trimming.
/// - `priority`: `high|medium|low`, default `medium`.
/// - `date`: `YYYY-MM-DD`, default today.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_add_task(
    title: String,
    description: Option<String>,
    is_mit: Option<bool>,
    priority: Option<String>,
    date: Option<String>,
) -> PlannerActionResponse {
    let title = title.trim().to_string();
    if title.is_empty() {
        return PlannerActionResponse::failure("planner_add_task failed: title is empty");
    }

    let request = match build_new_task(title, description, is_mit, priority, date) {
        Ok(request) => request,
        Err(err) => return PlannerActionResponse::failure(format!("planner_add_task failed: {err}")),
    };
    match with_planner(|planner| planner.add_task(request)) {
        Ok(task) => PlannerActionResponse::success("Task added.", task.id),
        Err(err) => PlannerActionResponse::failure(format!("planner_add_task failed: {err}")),
    }
}

/// Updates task fields; `None` leaves a field unchanged.
///
/// `clear_description = true` removes the description and wins over
/// `description`.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_update_task(
    id: String,
    title: Option<String>,
    description: Option<String>,
    clear_description: bool,
    is_mit: Option<bool>,
    priority: Option<String>,
    date: Option<String>,
) -> PlannerActionResponse {
    let patch = match build_task_patch(title, description, clear_description, is_mit, priority, date)
    {
        Ok(patch) => patch,
        Err(err) => {
            return PlannerActionResponse::failure(format!("planner_update_task failed: {err}"))
        }
    };
    match with_planner(|planner| planner.update_task(&id, &patch)) {
        Ok(applied) => PlannerActionResponse::from_applied(applied, id, "Task", "updated"),
        Err(err) => PlannerActionResponse::failure(format!("planner_update_task failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_toggle_task(id: String) -> PlannerActionResponse {
    match with_planner(|planner| planner.toggle_task(&id)) {
        Ok(applied) => PlannerActionResponse::from_applied(applied, id, "Task", "toggled"),
        Err(err) => PlannerActionResponse::failure(format!("planner_toggle_task failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_delete_task(id: String) -> PlannerActionResponse {
    match with_planner(|planner| planner.delete_task(&id)) {
        Ok(applied) => PlannerActionResponse::from_applied(applied, id, "Task", "deleted"),
        Err(err) => PlannerActionResponse::failure(format!("planner_delete_task failed: {err}")),
    }
}

/// Adds a habit.
///
/// # FFI contract
/// - `name` must be non-empty after trimming.
/// - `category`: `health|deepwork|learning|spiritual`.
/// - `target_days` outside `1..=7` is clamped.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_add_habit(
    name: String,
    category: String,
    icon: Option<String>,
    target_days: Option<u8>,
) -> PlannerActionResponse {
    let name = name.trim().to_string();
    if name.is_empty() {
        return PlannerActionResponse::failure("planner_add_habit failed: name is empty");
    }
    let Some(category) = HabitCategory::parse(category.trim()) else {
        return PlannerActionResponse::failure(format!(
            "planner_add_habit failed: unknown category `{category}`"
        ));
    };

    let mut request = NewHabit::new(name, category);
    request.icon = non_blank(icon);
    request.target_days = target_days;
    match with_planner(|planner| planner.add_habit(request)) {
        Ok(habit) => PlannerActionResponse::success("Habit added.", habit.id),
        Err(err) => PlannerActionResponse::failure(format!("planner_add_habit failed: {err}")),
    }
}

/// Toggles a habit for `date` (`YYYY-MM-DD`, default today).
#[flutter_rust_bridge::frb(sync)]
pub fn planner_toggle_habit(id: String, date: Option<String>) -> PlannerActionResponse {
    let date = match parse_optional_date(date) {
        Ok(date) => date,
        Err(err) => {
            return PlannerActionResponse::failure(format!("planner_toggle_habit failed: {err}"))
        }
    };
    let result = with_planner(|planner| match date {
        Some(date) => planner.toggle_habit_on(&id, date),
        None => planner.toggle_habit(&id),
    });
    match result {
        Ok(applied) => PlannerActionResponse::from_applied(applied, id, "Habit", "toggled"),
        Err(err) => PlannerActionResponse::failure(format!("planner_toggle_habit failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_update_habit(
    id: String,
    name: Option<String>,
    category: Option<String>,
    icon: Option<String>,
    target_days: Option<u8>,
) -> PlannerActionResponse {
    let name = name.map(|value| value.trim().to_string());
    if name.as_deref() == Some("") {
        return PlannerActionResponse::failure("planner_update_habit failed: name is empty");
    }
    let category = match category {
        Some(label) => match HabitCategory::parse(label.trim()) {
            Some(category) => Some(category),
            None => {
                return PlannerActionResponse::failure(format!(
                    "planner_update_habit failed: unknown category `{label}`"
                ))
            }
        },
        None => None,
    };

    let patch = HabitPatch {
        name,
        category,
        icon: non_blank(icon),
        target_days,
    };
    match with_planner(|planner| planner.update_habit(&id, &patch)) {
        Ok(applied) => PlannerActionResponse::from_applied(applied, id, "Habit", "updated"),
        Err(err) => PlannerActionResponse::failure(format!("planner_update_habit failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_delete_habit(id: String) -> PlannerActionResponse {
    match with_planner(|planner| planner.delete_habit(&id)) {
        Ok(applied) => PlannerActionResponse::from_applied(applied, id, "Habit", "deleted"),
        Err(err) => PlannerActionResponse::failure(format!("planner_delete_habit failed: {err}")),
    }
}

/// Upserts the energy entry for `date` (default today).
///
/// # FFI contract
/// - `mood` must be within `1..=5` when set.
/// - Negative sleep is stored as 0; non-finite sleep is ignored.
/// - Returned `id` is the entry's date key.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_set_energy(
    sleep_hours: Option<f64>,
    mood: Option<u8>,
    water_glasses: Option<u32>,
    date: Option<String>,
) -> PlannerActionResponse {
    let date = match parse_optional_date(date) {
        Ok(date) => date,
        Err(err) => {
            return PlannerActionResponse::failure(format!("planner_set_energy failed: {err}"))
        }
    };
    let mood = match mood.map(Mood::try_from).transpose() {
        Ok(mood) => mood,
        Err(err) => {
            return PlannerActionResponse::failure(format!("planner_set_energy failed: {err}"))
        }
    };

    let patch = EnergyPatch {
        sleep_hours,
        mood,
        water_glasses,
    };
    let result = with_planner(|planner| match date {
        Some(date) => planner.set_energy_on(date, &patch),
        None => planner.set_energy(&patch),
    });
    match result {
        Ok(entry) => PlannerActionResponse::success("Energy saved.", entry.date.to_string()),
        Err(err) => PlannerActionResponse::failure(format!("planner_set_energy failed: {err}")),
    }
}

/// Day view for `date` (default today).
#[flutter_rust_bridge::frb(sync)]
pub fn planner_today(date: Option<String>) -> TodayResponse {
    let requested = parse_optional_date(date);
    let result = requested.and_then(|date| {
        with_planner(|planner| {
            let date = date.unwrap_or_else(|| planner.today());
            let overview = day_overview(planner.state(), date);
            TodayResponse {
                date: date.to_string(),
                progress: overview.progress,
                tasks: overview.tasks.iter().map(|task| to_task_item(task)).collect(),
                mit_ids: overview.mits.iter().map(|task| task.id.clone()).collect(),
                sleep_hours: overview.energy.map(|entry| entry.sleep_hours),
                mood: overview.energy.map(|entry| entry.mood.value()),
                water_glasses: overview.energy.map(|entry| entry.water_glasses),
                productivity: overview.productivity,
                productivity_band: overview
                    .productivity_band
                    .map(|band| band.as_str().to_string()),
                message: format!("{} task(s).", overview.tasks.len()),
            }
        })
    });

    result.unwrap_or_else(|err| TodayResponse {
        date: String::new(),
        progress: 0,
        tasks: Vec::new(),
        mit_ids: Vec::new(),
        sleep_hours: None,
        mood: None,
        water_glasses: None,
        productivity: None,
        productivity_band: None,
        message: format!("planner_today failed: {err}"),
    })
}

/// Habit cards as of today.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_habits() -> HabitsResponse {
    let result = with_planner(|planner| {
        let today = planner.today();
        planner
            .state()
            .habits
            .iter()
            .map(|habit| {
                let overview = habit_overview(habit, today);
                HabitItem {
                    id: habit.id.clone(),
                    name: habit.name.clone(),
                    category: habit.category.as_str().to_string(),
                    icon: habit.icon.clone(),
                    streak: overview.streak,
                    done_today: overview.done_today,
                    show_missed_reminder: overview.show_missed_reminder,
                    show_streak_badge: overview.show_streak_badge,
                    completed_this_week: saturating_u32(overview.completed_this_week),
                    target_days: overview.target_days,
                    calendar: habit_calendar_weeks(habit, HABIT_CALENDAR_WEEKS, today)
                        .into_iter()
                        .map(|week| {
                            week.into_iter()
                                .map(|cell| CalendarDayItem {
                                    date: cell.date.to_string(),
                                    completed: cell.completed,
                                })
                                .collect()
                        })
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
    });

    match result {
        Ok(items) => HabitsResponse {
            message: format!("{} habit(s).", items.len()),
            items,
        },
        Err(err) => HabitsResponse {
            items: Vec::new(),
            message: format!("planner_habits failed: {err}"),
        },
    }
}

/// Summary of the 7 days ending today.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_weekly() -> WeeklyResponse {
    let result = with_planner(|planner| {
        let state = planner.state();
        weekly_stats(
            &state.tasks,
            &state.habits,
            &state.energy_logs,
            planner.today(),
        )
    });

    match result {
        Ok(stats) => WeeklyResponse {
            days: stats.days.iter().map(ToString::to_string).collect(),
            completion_rate: stats.completion_rate,
            completed_tasks: saturating_u32(stats.completed_tasks),
            total_tasks: saturating_u32(stats.total_tasks),
            avg_mood: stats.avg_mood,
            avg_sleep: stats.avg_sleep,
            daily: stats
                .daily
                .iter()
                .map(|day| DailyCompletionItem {
                    date: day.date.to_string(),
                    rate: day.rate,
                    total: saturating_u32(day.total),
                })
                .collect(),
            top_streaks: stats
                .top_streaks
                .into_iter()
                .map(|entry| StreakItem {
                    habit_id: entry.habit_id,
                    streak: entry.streak,
                })
                .collect(),
            message: format!("{} task(s) this week.", stats.total_tasks),
        },
        Err(err) => WeeklyResponse {
            days: Vec::new(),
            completion_rate: 0,
            completed_tasks: 0,
            total_tasks: 0,
            avg_mood: 0.0,
            avg_sleep: 0.0,
            daily: Vec::new(),
            top_streaks: Vec::new(),
            message: format!("planner_weekly failed: {err}"),
        },
    }
}

fn build_new_task(
    title: String,
    description: Option<String>,
    is_mit: Option<bool>,
    priority: Option<String>,
    date: Option<String>,
) -> Result<NewTask, String> {
    Ok(NewTask {
        title,
        description: non_blank(description),
        is_mit: is_mit.unwrap_or(false),
        priority: parse_optional_priority(priority)?.unwrap_or_default(),
        date: parse_optional_date(date)?,
    })
}

fn build_task_patch(
    title: Option<String>,
    description: Option<String>,
    clear_description: bool,
    is_mit: Option<bool>,
    priority: Option<String>,
    date: Option<String>,
) -> Result<TaskPatch, String> {
    let title = title.map(|value| value.trim().to_string());
    if title.as_deref() == Some("") {
        return Err("title is empty".to_string());
    }
    let description = if clear_description {
        Some(None)
    } else {
        non_blank(description).map(Some)
    };

    Ok(TaskPatch {
        title,
        description,
        is_mit,
        priority: parse_optional_priority(priority)?,
        date: parse_optional_date(date)?,
    })
}

/// Treats whitespace-only optional text as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_optional_priority(priority: Option<String>) -> Result<Option<Priority>, String> {
    priority
        .map(|label| {
            Priority::parse(label.trim()).ok_or_else(|| format!("unknown priority `{label}`"))
        })
        .transpose()
}

fn parse_optional_date(date: Option<String>) -> Result<Option<DateKey>, String> {
    date.map(|value| DateKey::parse(value.trim()).map_err(|err| err.to_string()))
        .transpose()
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        completed: task.completed,
        is_mit: task.is_mit,
        priority: task.priority.as_str().to_string(),
        date: task.date.to_string(),
        created_at: task.created_at,
        completed_at: task.completed_at,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn resolve_planner_db_path() -> PathBuf {
    PLANNER_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("DAYPLAN_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(PLANNER_DB_FILE_NAME)
        })
        .clone()
}

fn with_planner<T>(
    f: impl FnOnce(&mut Planner<SqliteKeyValueStore<'_>, SystemClock>) -> T,
) -> Result<T, String> {
    let _guard = PLANNER_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let db_path = resolve_planner_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("planner DB open failed: {err}"))?;
    let mut planner = Planner::open(
        SnapshotStorage::new(SqliteKeyValueStore::new(&conn)),
        SystemClock,
    );
    let output = f(&mut planner);
    if !planner.last_save_succeeded() {
        warn!("event=ffi_call module=ffi status=degraded reason=snapshot_not_persisted");
    }
    Ok(output)
}
