//! Derived planner analytics.
//!
//! # Responsibility
//! - Compute read-side projections (progress, streaks, weekly stats) from
//!   raw collections.
//!
//! # Invariants
//! - Functions are pure: inputs are never mutated and nothing is cached.
//! - Time-relative functions take `today` explicitly.
//! - Empty inputs yield 0 for every percentage and average.

pub mod habits;
pub mod productivity;
pub mod tasks;
pub mod weekly;

/// `round(100 * part / total)` with half-up rounding; 0 when `total == 0`.
pub(crate) fn rounded_percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u64;
    let total = total as u64;
    let percent = (200 * part + total) / (2 * total);
    percent.min(100) as u8
}
