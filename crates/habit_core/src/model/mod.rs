//! Habit domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId`.
//! - Derived statistics are never part of the persisted model.

pub mod habit;
