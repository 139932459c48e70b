//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record-store mutations and storage persistence.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod habit_service;
