//! Streak and completion-rate computation.
//!
//! # Responsibility
//! - Map one habit's completion history to `HabitStats`.
//!
//! # Invariants
//! - Pure: reads `completions`, never mutates it, performs no I/O.
//! - Deterministic for a fixed `today` anchor and input map.
//! - Longest streak scans only recorded entries; unrecorded calendar gaps
//!   between entries do not break a run.
//! - Malformed keys never extend the current streak, take their
//!   lexicographic position in the longest-streak scan, and count toward
//!   the total when `true`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{format_date_key, last_n_days_ending, shift_days, today};
use crate::model::habit::Completions;

/// Trailing window used for `completion_rate`.
pub const COMPLETION_RATE_WINDOW_DAYS: usize = 30;

/// Derived statistics for one habit. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u32,
    /// Integer percentage in `0..=100` over the trailing window.
    pub completion_rate: u32,
}

/// Computes stats anchored at the local calendar date.
pub fn calculate_habit_stats(completions: &Completions) -> HabitStats {
    calculate_habit_stats_on(completions, today())
}

/// Computes stats anchored at `today`.
pub fn calculate_habit_stats_on(completions: &Completions, today: NaiveDate) -> HabitStats {
    HabitStats {
        current_streak: current_streak(completions, today),
        longest_streak: longest_streak(completions),
        total_completions: total_completions(completions),
        completion_rate: completion_rate(completions, today),
    }
}

/// Consecutive completed days ending at `today`; 0 when today is not done.
pub fn current_streak(completions: &Completions, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    while is_completed(completions, &format_date_key(cursor)) {
        streak += 1;
        let previous = shift_days(cursor, -1);
        if previous == cursor {
            break;
        }
        cursor = previous;
    }
    streak
}

/// Longest run of `true` entries over the sorted recorded keys.
///
/// A `false` entry resets the run. Dates with no entry are not visited.
pub fn longest_streak(completions: &Completions) -> u32 {
    let mut longest = 0;
    let mut running = 0;
    for done in completions.values().copied() {
        if done {
            running += 1;
            longest = longest.max(running);
        } else {
            running = 0;
        }
    }
    longest
}

/// Count of `true` entries regardless of date.
pub fn total_completions(completions: &Completions) -> u32 {
    let count = completions.values().filter(|done| **done).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Rounded share of completed days in the trailing 30-day window.
pub fn completion_rate(completions: &Completions, today: NaiveDate) -> u32 {
    let window = last_n_days_ending(today, COMPLETION_RATE_WINDOW_DAYS);
    let hits = window
        .iter()
        .filter(|key| is_completed(completions, key))
        .count();
    let rate = (hits as f64 / COMPLETION_RATE_WINDOW_DAYS as f64) * 100.0;
    rate.round() as u32
}

fn is_completed(completions: &Completions, key: &str) -> bool {
    completions.get(key).copied().unwrap_or(false)
}
