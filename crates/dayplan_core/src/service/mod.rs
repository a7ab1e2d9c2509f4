//! Core use-case services.
//!
//! # Responsibility
//! - Own planner state and orchestrate mutations with persistence.
//! - Keep FFI/CLI callers decoupled from storage backends.

pub mod planner;
