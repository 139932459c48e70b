//! Read-side projections over habit completion history.
//!
//! # Responsibility
//! - Derive per-habit streak and rate statistics.
//! - Classify streak lengths into feedback tiers.
//! - Aggregate dashboard totals across habits.
//!
//! # Invariants
//! - Everything here is pure and recomputed on read; nothing is cached or
//!   persisted.

pub mod engine;
pub mod overview;
pub mod tier;
