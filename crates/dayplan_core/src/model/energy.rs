//! Daily energy log model.
//!
//! # Invariants
//! - At most one entry per date key in a collection (enforced by the planner).
//! - `sleep_hours` is finite and non-negative.
//! - `mood` is within `1..=5`.

use crate::model::date::DateKey;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

pub const DEFAULT_SLEEP_HOURS: f64 = 7.0;
pub const DEFAULT_WATER_GLASSES: u32 = 0;

/// Self-reported mood on a 1 (drained) to 5 (energized) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mood(u8);

impl Mood {
    pub const MIN: Mood = Mood(1);
    pub const MAX: Mood = Mood(5);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Mood {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("mood {value} is outside 1..=5"))
    }
}

impl From<Mood> for u8 {
    fn from(value: Mood) -> Self {
        value.0
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sleep, mood and hydration for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEnergy {
    pub date: DateKey,
    #[serde(deserialize_with = "deserialize_sleep_hours")]
    pub sleep_hours: f64,
    pub mood: Mood,
    pub water_glasses: u32,
}

impl DailyEnergy {
    /// Entry for `date` holding default values.
    pub fn with_defaults(date: DateKey) -> Self {
        Self {
            date,
            sleep_hours: DEFAULT_SLEEP_HOURS,
            mood: Mood::default(),
            water_glasses: DEFAULT_WATER_GLASSES,
        }
    }

    /// Shallow-merges set fields of `patch`.
    ///
    /// Non-finite sleep values are ignored; negative ones become zero.
    pub fn apply_patch(&mut self, patch: &EnergyPatch) {
        if let Some(sleep_hours) = patch.sleep_hours.filter(|hours| hours.is_finite()) {
            self.sleep_hours = sleep_hours.max(0.0);
        }
        if let Some(mood) = patch.mood {
            self.mood = mood;
        }
        if let Some(water_glasses) = patch.water_glasses {
            self.water_glasses = water_glasses;
        }
    }
}

/// Stored sleep values below zero load as zero.
fn deserialize_sleep_hours<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(|hours| hours.max(0.0))
}

/// Partial update for a day's energy entry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyPatch {
    pub sleep_hours: Option<f64>,
    pub mood: Option<Mood>,
    pub water_glasses: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::{DailyEnergy, EnergyPatch, Mood};
    use crate::model::date::DateKey;

    fn entry() -> DailyEnergy {
        DailyEnergy::with_defaults(DateKey::parse("2026-10-17").expect("valid date key"))
    }

    #[test]
    fn mood_rejects_out_of_range_values() {
        assert_eq!(Mood::new(0), None);
        assert_eq!(Mood::new(6), None);
        assert_eq!(Mood::new(4).map(Mood::value), Some(4));
        assert!(serde_json::from_str::<Mood>("9").is_err());
    }

    #[test]
    fn patch_ignores_nan_and_floors_negative_sleep() {
        let mut energy = entry();
        energy.apply_patch(&EnergyPatch {
            sleep_hours: Some(f64::NAN),
            ..EnergyPatch::default()
        });
        assert_eq!(energy.sleep_hours, 7.0);

        energy.apply_patch(&EnergyPatch {
            sleep_hours: Some(-2.0),
            water_glasses: Some(4),
            ..EnergyPatch::default()
        });
        assert_eq!(energy.sleep_hours, 0.0);
        assert_eq!(energy.water_glasses, 4);
        assert_eq!(energy.mood, Mood::default());
    }

    #[test]
    fn serializes_with_snapshot_field_names() {
        let value = serde_json::to_value(entry()).expect("serialize energy");
        assert_eq!(value["date"], "2026-10-17");
        assert_eq!(value["sleepHours"], 7.0);
        assert_eq!(value["mood"], 3);
        assert_eq!(value["waterGlasses"], 0);
    }
}
