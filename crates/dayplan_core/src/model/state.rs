//! Aggregate planner state.
//!
//! `AppState` is the unit of persistence: every mutation writes the whole
//! value and every load reads the whole value back.

use crate::model::date::DateKey;
use crate::model::energy::DailyEnergy;
use crate::model::habit::Habit;
use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// All planner collections.
///
/// Missing collections in a stored snapshot deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub energy_logs: Vec<DailyEnergy>,
}

impl AppState {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.habits.is_empty() && self.energy_logs.is_empty()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn energy_for(&self, date: DateKey) -> Option<&DailyEnergy> {
        self.energy_logs.iter().find(|entry| entry.date == date)
    }

    /// Repairs cross-field invariants serde cannot express per field.
    pub fn normalize(&mut self) {
        self.tasks.iter_mut().for_each(Task::normalize_completion);
    }
}
