//! Planner domain model.
//!
//! # Responsibility
//! - Define tasks, habits, daily energy entries and the aggregate state.
//! - Own the persisted snapshot field naming (camelCase JSON).
//!
//! # Invariants
//! - Entities are identified by opaque string IDs from `new_entity_id`.
//! - Every calendar day is a validated `DateKey`.

pub mod date;
pub mod energy;
pub mod habit;
pub mod state;
pub mod task;

use uuid::Uuid;

/// Generates a collision-resistant entity ID.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}
