//! Task projections for a single day.

use crate::analytics::rounded_percent;
use crate::model::date::DateKey;
use crate::model::task::Task;

/// Maximum MITs surfaced per day.
pub const MAX_MIT_TASKS: usize = 3;

/// Completion ratio for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCompletion {
    pub date: DateKey,
    /// Rounded completion percentage, 0 when `total == 0`.
    pub rate: u8,
    pub total: usize,
}

/// Tasks whose date key equals `date`, in collection order.
pub fn tasks_for_date(tasks: &[Task], date: DateKey) -> Vec<&Task> {
    tasks.iter().filter(|task| task.date == date).collect()
}

/// Rounded percentage of `date`'s tasks that are completed.
pub fn daily_progress(tasks: &[Task], date: DateKey) -> u8 {
    day_completion(tasks, date).rate
}

/// First `MAX_MIT_TASKS` MIT-flagged tasks for `date`, without re-sorting.
pub fn mit_tasks(tasks: &[Task], date: DateKey) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.date == date && task.is_mit)
        .take(MAX_MIT_TASKS)
        .collect()
}

/// Completion ratio for each day in `days`, preserving input order.
pub fn daily_completion_series(tasks: &[Task], days: &[DateKey]) -> Vec<DayCompletion> {
    days.iter().map(|day| day_completion(tasks, *day)).collect()
}

fn day_completion(tasks: &[Task], date: DateKey) -> DayCompletion {
    let (total, completed) = tasks
        .iter()
        .filter(|task| task.date == date)
        .fold((0, 0), |(total, completed), task| {
            (total + 1, completed + usize::from(task.completed))
        });
    DayCompletion {
        date,
        rate: rounded_percent(completed, total),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::{daily_completion_series, daily_progress, mit_tasks, tasks_for_date};
    use crate::model::date::DateKey;
    use crate::model::task::{Priority, Task};

    fn day(value: &str) -> DateKey {
        DateKey::parse(value).expect("valid date key")
    }

    fn task(id: &str, date: &str, completed: bool, is_mit: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: None,
            completed,
            is_mit,
            priority: Priority::Medium,
            date: day(date),
            created_at: 0,
            completed_at: completed.then_some(1),
        }
    }

    #[test]
    fn tasks_for_date_filters_by_exact_key() {
        let tasks = vec![
            task("a", "2026-10-17", false, false),
            task("b", "2026-10-16", false, false),
            task("c", "2026-10-17", true, false),
        ];
        let ids: Vec<&str> = tasks_for_date(&tasks, day("2026-10-17"))
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn daily_progress_is_zero_without_tasks_and_rounds_otherwise() {
        assert_eq!(daily_progress(&[], day("2026-10-17")), 0);

        let tasks = vec![
            task("a", "2026-10-17", true, false),
            task("b", "2026-10-17", false, false),
            task("c", "2026-10-17", false, false),
            task("other-day", "2026-10-16", true, false),
        ];
        assert_eq!(daily_progress(&tasks, day("2026-10-17")), 33);
        assert_eq!(daily_progress(&tasks, day("2026-10-16")), 100);
    }

    #[test]
    fn mit_tasks_caps_at_three_in_collection_order() {
        let tasks = vec![
            task("m1", "2026-10-17", false, true),
            task("plain", "2026-10-17", false, false),
            task("m2", "2026-10-17", true, true),
            task("elsewhere", "2026-10-18", false, true),
            task("m3", "2026-10-17", false, true),
            task("m4", "2026-10-17", false, true),
        ];
        let ids: Vec<&str> = mit_tasks(&tasks, day("2026-10-17"))
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn completion_series_reports_rate_and_total_per_day() {
        let tasks = vec![
            task("a", "2026-10-16", true, false),
            task("b", "2026-10-16", false, false),
        ];
        let series = daily_completion_series(&tasks, &[day("2026-10-16"), day("2026-10-17")]);
        assert_eq!(series.len(), 2);
        assert_eq!((series[0].rate, series[0].total), (50, 2));
        assert_eq!((series[1].rate, series[1].total), (0, 0));
    }
}
