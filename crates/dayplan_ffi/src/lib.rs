//! Flutter-facing bindings for the dayplan core.
//!
//! Every exported function lives in [`api`] and returns a plain envelope
//! instead of panicking or propagating Rust errors.

pub mod api;
