//! In-memory habit record store.
//!
//! # Responsibility
//! - Own the authoritative habit collection for the application layer.
//! - Expose the only mutation paths: create, update, delete, toggle.
//!
//! # Invariants
//! - Every mutation leaves the store in a consistent snapshot.
//! - Writes validate input before touching any record.
//! - Statistics are never stored here.

pub mod habit_store;
