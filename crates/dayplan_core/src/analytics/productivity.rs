//! Productivity estimate and the per-day overview.

use crate::analytics::tasks::{daily_progress, mit_tasks, tasks_for_date};
use crate::model::date::DateKey;
use crate::model::energy::{DailyEnergy, Mood};
use crate::model::state::AppState;
use crate::model::task::Task;

const MOOD_WEIGHT: f64 = 35.0;
const SLEEP_WEIGHT: f64 = 30.0;
const COMPLETION_WEIGHT: f64 = 35.0;
const TARGET_SLEEP_HOURS: f64 = 8.0;

/// Coarse bucket of a productivity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductivityBand {
    High,
    Medium,
    Low,
}

impl ProductivityBand {
    /// `High` from 70, `Medium` from 40, `Low` below.
    pub fn from_score(score: u8) -> Self {
        match score {
            70..=u8::MAX => Self::High,
            40..=69 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Everything shown for one planner day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOverview<'a> {
    pub date: DateKey,
    pub tasks: Vec<&'a Task>,
    pub pending: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
    pub mits: Vec<&'a Task>,
    pub progress: u8,
    pub energy: Option<&'a DailyEnergy>,
    /// Present only when the day has an energy entry.
    pub productivity: Option<u8>,
    pub productivity_band: Option<ProductivityBand>,
}

/// Weighted 0..=100 score from completion rate, mood and sleep.
///
/// `round(35 * mood/5 + 30 * min(sleep/8, 1) + 35 * rate/100)`. Rates above
/// 100 are clamped; negative or non-finite sleep counts as zero.
pub fn estimate_productivity(completion_rate: u8, mood: Mood, sleep_hours: f64) -> u8 {
    let completion_rate = f64::from(completion_rate.min(100));
    let sleep_hours = if sleep_hours.is_finite() {
        sleep_hours.max(0.0)
    } else {
        0.0
    };

    let mood_score = (f64::from(mood.value()) / 5.0) * MOOD_WEIGHT;
    let sleep_score = (sleep_hours / TARGET_SLEEP_HOURS).min(1.0) * SLEEP_WEIGHT;
    let completion_score = (completion_rate / 100.0) * COMPLETION_WEIGHT;

    (mood_score + sleep_score + completion_score)
        .round()
        .clamp(0.0, 100.0) as u8
}

pub fn energy_for_date(logs: &[DailyEnergy], date: DateKey) -> Option<&DailyEnergy> {
    logs.iter().find(|entry| entry.date == date)
}

/// Builds the day view: task partitions, MITs, progress and productivity.
pub fn day_overview(state: &AppState, date: DateKey) -> DayOverview<'_> {
    let tasks = tasks_for_date(&state.tasks, date);
    let (completed, pending): (Vec<&Task>, Vec<&Task>) =
        tasks.iter().copied().partition(|task| task.completed);
    let progress = daily_progress(&state.tasks, date);
    let energy = energy_for_date(&state.energy_logs, date);
    let productivity =
        energy.map(|entry| estimate_productivity(progress, entry.mood, entry.sleep_hours));

    DayOverview {
        date,
        mits: mit_tasks(&state.tasks, date),
        tasks,
        pending,
        completed,
        progress,
        energy,
        productivity,
        productivity_band: productivity.map(ProductivityBand::from_score),
    }
}
