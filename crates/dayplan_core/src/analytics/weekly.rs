//! Seven-day summary.

use crate::analytics::habits::{top_streaks, HabitStreak, DAYS_PER_WEEK};
use crate::analytics::rounded_percent;
use crate::analytics::tasks::{daily_completion_series, DayCompletion};
use crate::model::date::{last_n_days, DateKey};
use crate::model::energy::DailyEnergy;
use crate::model::habit::Habit;
use crate::model::task::Task;

/// Number of habits listed in `WeeklyStats::top_streaks`.
pub const WEEKLY_TOP_STREAKS: usize = 3;

/// Aggregates over the 7 days ending today (inclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyStats {
    /// Window days, oldest first; the last entry is today.
    pub days: Vec<DateKey>,
    pub completion_rate: u8,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    /// 0 when no energy entry falls in the window.
    pub avg_mood: f64,
    /// 0 when no energy entry falls in the window.
    pub avg_sleep: f64,
    /// Per-day completion, aligned with `days`.
    pub daily: Vec<DayCompletion>,
    pub top_streaks: Vec<HabitStreak>,
}

pub fn weekly_stats(
    tasks: &[Task],
    habits: &[Habit],
    energy_logs: &[DailyEnergy],
    today: DateKey,
) -> WeeklyStats {
    let days = last_n_days(today, DAYS_PER_WEEK);
    let window_start = today.days_before(DAYS_PER_WEEK - 1);
    let in_window = |date: DateKey| date >= window_start && date <= today;

    let (total_tasks, completed_tasks) = tasks
        .iter()
        .filter(|task| in_window(task.date))
        .fold((0, 0), |(total, completed), task| {
            (total + 1, completed + usize::from(task.completed))
        });

    let week_logs: Vec<&DailyEnergy> = energy_logs
        .iter()
        .filter(|entry| in_window(entry.date))
        .collect();
    let avg_mood = average(week_logs.iter().map(|entry| f64::from(entry.mood.value())));
    let avg_sleep = average(week_logs.iter().map(|entry| entry.sleep_hours));

    WeeklyStats {
        daily: daily_completion_series(tasks, &days),
        days,
        completion_rate: rounded_percent(completed_tasks, total_tasks),
        completed_tasks,
        total_tasks,
        avg_mood,
        avg_sleep,
        top_streaks: top_streaks(habits, today, WEEKLY_TOP_STREAKS),
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}
