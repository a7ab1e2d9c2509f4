//! Planner store: the single owner of planner state.
//!
//! # Responsibility
//! - Hold the current `AppState` and expose its mutation use-cases.
//! - Persist the full snapshot synchronously after every mutation.
//!
//! # Invariants
//! - In-memory state and the last attempted save never diverge across an
//!   operation boundary; there is no batching or debouncing.
//! - Unknown IDs are silent no-ops (`false`), never errors.
//! - At most one energy entry exists per date.
//! - Callers validate text input (non-empty titles/names) before calling.

use crate::clock::{Clock, SystemClock};
use crate::model::date::DateKey;
use crate::model::energy::{DailyEnergy, EnergyPatch};
use crate::model::habit::{Habit, HabitPatch, NewHabit};
use crate::model::new_entity_id;
use crate::model::state::AppState;
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::storage::{KeyValueStore, SnapshotStorage};
use log::debug;

/// Stateful planner over a snapshot storage backend.
pub struct Planner<K: KeyValueStore, C: Clock = SystemClock> {
    state: AppState,
    storage: SnapshotStorage<K>,
    clock: C,
    last_save_ok: bool,
}

impl<K: KeyValueStore, C: Clock> Planner<K, C> {
    /// Loads the stored snapshot (or defaults) and takes ownership of it.
    pub fn open(storage: SnapshotStorage<K>, clock: C) -> Self {
        let state = storage.load();
        Self {
            state,
            storage,
            clock,
            last_save_ok: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn today(&self) -> DateKey {
        self.clock.today()
    }

    /// Whether the most recent mutation reached the storage backend.
    ///
    /// `false` means the planner is running in-memory only until a later
    /// save succeeds.
    pub fn last_save_succeeded(&self) -> bool {
        self.last_save_ok
    }

    /// Appends a task dated today unless `new_task.date` says otherwise.
    pub fn add_task(&mut self, new_task: NewTask) -> Task {
        let task = new_task.into_task(
            new_entity_id(),
            self.clock.today(),
            self.clock.now_epoch_ms(),
        );
        self.state.tasks.push(task.clone());
        self.commit("add_task", true);
        task
    }

    pub fn update_task(&mut self, id: &str, patch: &TaskPatch) -> bool {
        let found = match self.task_mut(id) {
            Some(task) => {
                task.apply_patch(patch);
                true
            }
            None => false,
        };
        self.commit("update_task", found)
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|task| task.id != id);
        let found = self.state.tasks.len() != before;
        self.commit("delete_task", found)
    }

    /// Flips completion; `completed_at` is stamped on completion and
    /// cleared on reopening.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        let now = self.clock.now_epoch_ms();
        let found = match self.task_mut(id) {
            Some(task) => {
                task.toggle(now);
                true
            }
            None => false,
        };
        self.commit("toggle_task", found)
    }

    pub fn add_habit(&mut self, new_habit: NewHabit) -> Habit {
        let habit = new_habit.into_habit(new_entity_id(), self.clock.now_epoch_ms());
        self.state.habits.push(habit.clone());
        self.commit("add_habit", true);
        habit
    }

    /// Toggles today's completion for the habit.
    pub fn toggle_habit(&mut self, id: &str) -> bool {
        let today = self.clock.today();
        self.toggle_habit_on(id, today)
    }

    /// Inserts `date` into the completion set when absent, removes it
    /// otherwise.
    pub fn toggle_habit_on(&mut self, id: &str, date: DateKey) -> bool {
        let found = match self.habit_mut(id) {
            Some(habit) => {
                habit.completions.toggle(date);
                true
            }
            None => false,
        };
        self.commit("toggle_habit", found)
    }

    pub fn update_habit(&mut self, id: &str, patch: &HabitPatch) -> bool {
        let found = match self.habit_mut(id) {
            Some(habit) => {
                habit.apply_patch(patch);
                true
            }
            None => false,
        };
        self.commit("update_habit", found)
    }

    pub fn delete_habit(&mut self, id: &str) -> bool {
        let before = self.state.habits.len();
        self.state.habits.retain(|habit| habit.id != id);
        let found = self.state.habits.len() != before;
        self.commit("delete_habit", found)
    }

    /// Upserts today's energy entry.
    pub fn set_energy(&mut self, patch: &EnergyPatch) -> DailyEnergy {
        let today = self.clock.today();
        self.set_energy_on(today, patch)
    }

    /// Upserts the energy entry for `date`.
    ///
    /// A missing entry starts from defaults before `patch` is applied; an
    /// existing one keeps every field `patch` leaves unset.
    pub fn set_energy_on(&mut self, date: DateKey, patch: &EnergyPatch) -> DailyEnergy {
        let logs = &mut self.state.energy_logs;
        let index = match logs.iter().position(|entry| entry.date == date) {
            Some(index) => index,
            None => {
                logs.push(DailyEnergy::with_defaults(date));
                logs.len() - 1
            }
        };
        logs[index].apply_patch(patch);
        let entry = logs[index].clone();
        self.commit("set_energy", true);
        entry
    }

    fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.state.tasks.iter_mut().find(|task| task.id == id)
    }

    fn habit_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.state.habits.iter_mut().find(|habit| habit.id == id)
    }

    fn commit(&mut self, operation: &'static str, applied: bool) -> bool {
        self.last_save_ok = self.storage.save(&self.state);
        debug!(
            "event=planner_mutation module=planner operation={operation} applied={applied} persisted={}",
            self.last_save_ok
        );
        applied
    }
}
