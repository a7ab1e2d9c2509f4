//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dayplan_core` linkage.
//! - With a DB path argument, print a read-only summary of the stored plan.
//!
//! Usage: `dayplan_cli [DB_PATH]`

use dayplan_core::db::open_db;
use dayplan_core::{
    day_overview, habit_overview, weekly_stats, Clock, SnapshotStorage, SqliteKeyValueStore,
    SystemClock,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("dayplan_core ping={}", dayplan_core::ping());
    println!("dayplan_core version={}", dayplan_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match print_summary(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(db_path: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("cannot open `{db_path}`: {err}"))?;
    let storage = SnapshotStorage::new(SqliteKeyValueStore::new(&conn));
    let state = storage
        .try_load()
        .map_err(|err| format!("cannot read snapshot: {err}"))?
        .unwrap_or_default();
    let today = SystemClock.today();

    let overview = day_overview(&state, today);
    println!(
        "today={} progress={}% tasks={} mits={}",
        today,
        overview.progress,
        overview.tasks.len(),
        overview.mits.len()
    );
    for task in &overview.tasks {
        let mark = if task.completed { "x" } else { " " };
        let mit = if task.is_mit { " *" } else { "" };
        println!("  [{mark}] {} ({}){mit}", task.title, task.priority.as_str());
    }
    if let Some(score) = overview.productivity {
        println!("productivity={score}");
    }

    for habit in &state.habits {
        let card = habit_overview(habit, today);
        println!(
            "habit {} {} streak={} week={}/{}",
            habit.icon, habit.name, card.streak, card.completed_this_week, card.target_days
        );
    }

    let weekly = weekly_stats(&state.tasks, &state.habits, &state.energy_logs, today);
    println!(
        "week completion={}% tasks={}/{} avg_mood={:.1} avg_sleep={:.1}",
        weekly.completion_rate,
        weekly.completed_tasks,
        weekly.total_tasks,
        weekly.avg_mood,
        weekly.avg_sleep
    );
    Ok(())
}
