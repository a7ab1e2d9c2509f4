//! Habit streaks, calendars and reminders.
//!
//! # Invariants
//! - Streak lookback is bounded by `STREAK_LOOKBACK_DAYS`.
//! - A missing completion for today never breaks a streak that ends
//!   yesterday.

use crate::model::date::{last_n_days, DateKey};
use crate::model::habit::Habit;

pub const STREAK_LOOKBACK_DAYS: u32 = 365;
/// Consecutive missed days (excluding today) that trigger a reminder.
pub const MISSED_REMINDER_DAYS: u32 = 3;
/// Streak length that earns a badge.
pub const STREAK_BADGE_DAYS: u32 = 7;
pub const DAYS_PER_WEEK: u32 = 7;

/// One cell of a habit calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: DateKey,
    pub completed: bool,
}

/// Streak entry used by summary rankings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStreak {
    pub habit_id: String,
    pub streak: u32,
}

/// Per-habit card projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitOverview {
    pub streak: u32,
    pub done_today: bool,
    /// Missed-days reminder; never shown once today is done.
    pub show_missed_reminder: bool,
    pub show_streak_badge: bool,
    /// Completions within the 7 days ending today.
    pub completed_this_week: usize,
    pub target_days: u8,
}

/// Consecutive completed days walking backward from `today`.
///
/// Today may be missing without breaking the run; any earlier gap stops it.
pub fn habit_streak(habit: &Habit, today: DateKey) -> u32 {
    if habit.completions.is_empty() {
        return 0;
    }

    let mut streak = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        if habit.is_completed_on(today.days_before(offset)) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

/// The last `weeks * 7` days ending today, oldest first, in 7-day chunks.
pub fn habit_calendar_weeks(habit: &Habit, weeks: u32, today: DateKey) -> Vec<Vec<CalendarDay>> {
    let days = last_n_days(today, weeks.saturating_mul(DAYS_PER_WEEK));
    days.chunks(DAYS_PER_WEEK as usize)
        .map(|week| {
            week.iter()
                .map(|date| CalendarDay {
                    date: *date,
                    completed: habit.is_completed_on(*date),
                })
                .collect()
        })
        .collect()
}

/// Whether the habit was skipped on each of the 3 days before today.
///
/// Habits younger than the 3-day window never trigger, so a habit created
/// today (or with unknown creation day) does not nag immediately.
pub fn should_show_missed_reminder(habit: &Habit, today: DateKey) -> bool {
    let window_start = today.days_before(MISSED_REMINDER_DAYS);
    match habit.created_on() {
        Some(created_on) if created_on <= window_start => {}
        _ => return false,
    }

    (1..=MISSED_REMINDER_DAYS).all(|offset| !habit.is_completed_on(today.days_before(offset)))
}

/// Card projection combining streak, reminder and weekly progress.
pub fn habit_overview(habit: &Habit, today: DateKey) -> HabitOverview {
    let streak = habit_streak(habit, today);
    let done_today = habit.is_completed_on(today);
    let completed_this_week = last_n_days(today, DAYS_PER_WEEK)
        .into_iter()
        .filter(|date| habit.is_completed_on(*date))
        .count();

    HabitOverview {
        streak,
        done_today,
        show_missed_reminder: !done_today && should_show_missed_reminder(habit, today),
        show_streak_badge: streak >= STREAK_BADGE_DAYS,
        completed_this_week,
        target_days: habit.target_days,
    }
}

/// Habits ranked by streak, longest first; ties keep collection order.
pub fn top_streaks(habits: &[Habit], today: DateKey, limit: usize) -> Vec<HabitStreak> {
    let mut ranked: Vec<HabitStreak> = habits
        .iter()
        .map(|habit| HabitStreak {
            habit_id: habit.id.clone(),
            streak: habit_streak(habit, today),
        })
        .collect();
    ranked.sort_by(|left, right| right.streak.cmp(&left.streak));
    ranked.truncate(limit);
    ranked
}
