//! Task domain model.
//!
//! # Invariants
//! - `completed_at` is `Some` exactly when `completed` is `true`.
//! - `title` is non-empty; callers validate before creating tasks.

use crate::model::date::DateKey;
use serde::{Deserialize, Serialize};

/// Task priority, serialized as `high|medium|low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses the lowercase wire label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// One planned task for a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    /// Most Important Task flag.
    #[serde(rename = "isMIT")]
    pub is_mit: bool,
    pub priority: Priority,
    pub date: DateKey,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds; present only while `completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl Task {
    /// Flips completion, stamping or clearing `completed_at`.
    pub fn toggle(&mut self, now_epoch_ms: i64) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now_epoch_ms);
    }

    /// Restores the `completed` / `completed_at` pairing on stored data.
    ///
    /// A completed task without a timestamp is stamped with `created_at`;
    /// an open task drops any stale timestamp.
    pub fn normalize_completion(&mut self) {
        if !self.completed {
            self.completed_at = None;
        } else if self.completed_at.is_none() {
            self.completed_at = Some(self.created_at);
        }
    }

    /// Merges the set fields of `patch` into this task.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(is_mit) = patch.is_mit {
            self.is_mit = is_mit;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// Creation request for a task.
///
/// `date = None` means "today" as seen by the planner clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub is_mit: bool,
    pub priority: Priority,
    pub date: Option<DateKey>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mit(mut self, is_mit: bool) -> Self {
        self.is_mit = is_mit;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn on(mut self, date: DateKey) -> Self {
        self.date = Some(date);
        self
    }

    pub(crate) fn into_task(self, id: String, today: DateKey, now_epoch_ms: i64) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            completed: false,
            is_mit: self.is_mit,
            priority: self.priority,
            date: self.date.unwrap_or(today),
            created_at: now_epoch_ms,
            completed_at: None,
        }
    }
}

/// Partial update for a task. Completion is changed only through toggling.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub is_mit: Option<bool>,
    pub priority: Option<Priority>,
    pub date: Option<DateKey>,
}
