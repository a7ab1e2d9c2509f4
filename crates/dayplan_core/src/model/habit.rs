//! Habit domain model.
//!
//! # Responsibility
//! - Define habits and their per-day completion set.
//! - Keep completion toggling a single-element symmetric difference.
//!
//! # Invariants
//! - A completion date appears at most once.
//! - `target_days` stays within `1..=7`.

use crate::model::date::DateKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

pub const DEFAULT_HABIT_ICON: &str = "⚡";
pub const MIN_TARGET_DAYS: u8 = 1;
pub const MAX_TARGET_DAYS: u8 = 7;

/// Habit grouping, serialized as `health|deepwork|learning|spiritual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Health,
    Deepwork,
    Learning,
    Spiritual,
}

impl HabitCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Deepwork => "deepwork",
            Self::Learning => "learning",
            Self::Spiritual => "spiritual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "health" => Some(Self::Health),
            "deepwork" => Some(Self::Deepwork),
            "learning" => Some(Self::Learning),
            "spiritual" => Some(Self::Spiritual),
            _ => None,
        }
    }
}

/// Set of days a habit was done.
///
/// Serialized as an ascending list of date keys; duplicates in stored input
/// collapse on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet(HashSet<DateKey>);

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: DateKey) -> bool {
        self.0.contains(&date)
    }

    /// Inserts `date` when absent, removes it when present.
    ///
    /// Returns whether the day is completed afterwards.
    pub fn toggle(&mut self, date: DateKey) -> bool {
        if self.0.remove(&date) {
            false
        } else {
            self.0.insert(date);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Completion dates in ascending order.
    pub fn sorted(&self) -> Vec<DateKey> {
        let mut dates: Vec<DateKey> = self.0.iter().copied().collect();
        dates.sort_unstable();
        dates
    }
}

impl FromIterator<DateKey> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = DateKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for CompletionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sorted().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompletionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dates = Vec::<DateKey>::deserialize(deserializer)?;
        Ok(dates.into_iter().collect())
    }
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub category: HabitCategory,
    pub icon: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub completions: CompletionSet,
    #[serde(deserialize_with = "deserialize_target_days")]
    pub target_days: u8,
}

impl Habit {
    pub fn is_completed_on(&self, date: DateKey) -> bool {
        self.completions.contains(date)
    }

    /// Local calendar day the habit was created on.
    pub fn created_on(&self) -> Option<DateKey> {
        DateKey::from_epoch_ms(self.created_at)
    }

    pub fn apply_patch(&mut self, patch: &HabitPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(target_days) = patch.target_days {
            self.target_days = clamp_target_days(target_days);
        }
    }
}

/// Clamps a weekly target into `1..=7`.
pub fn clamp_target_days(value: u8) -> u8 {
    value.clamp(MIN_TARGET_DAYS, MAX_TARGET_DAYS)
}

fn deserialize_target_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    u8::deserialize(deserializer).map(clamp_target_days)
}

/// Creation request for a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub category: HabitCategory,
    pub icon: Option<String>,
    pub target_days: Option<u8>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, category: HabitCategory) -> Self {
        Self {
            name: name.into(),
            category,
            icon: None,
            target_days: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_target_days(mut self, target_days: u8) -> Self {
        self.target_days = Some(target_days);
        self
    }

    pub(crate) fn into_habit(self, id: String, now_epoch_ms: i64) -> Habit {
        Habit {
            id,
            name: self.name,
            category: self.category,
            icon: self
                .icon
                .unwrap_or_else(|| DEFAULT_HABIT_ICON.to_string()),
            created_at: now_epoch_ms,
            completions: CompletionSet::new(),
            target_days: self
                .target_days
                .map_or(MAX_TARGET_DAYS, clamp_target_days),
        }
    }
}

/// Partial update for a habit. Completions change only through toggling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub category: Option<HabitCategory>,
    pub icon: Option<String>,
    pub target_days: Option<u8>,
}
