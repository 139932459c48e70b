//! Dashboard aggregate across all habits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::calculate_habit_stats_on;
use crate::model::habit::HabitRecord;

/// Totals shown above the habit list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub total_habits: u32,
    pub total_completions: u32,
    /// Rounded mean of per-habit completion rates; 0 with no habits.
    pub average_completion_rate: u32,
    /// Highest `longest_streak` across habits.
    pub best_streak: u32,
}

impl StatsOverview {
    pub fn from_habits(habits: &[HabitRecord], today: NaiveDate) -> Self {
        if habits.is_empty() {
            return Self::default();
        }

        let mut overview = Self {
            total_habits: u32::try_from(habits.len()).unwrap_or(u32::MAX),
            ..Self::default()
        };
        let mut rate_sum: u64 = 0;
        for habit in habits {
            let stats = calculate_habit_stats_on(&habit.completions, today);
            overview.total_completions = overview
                .total_completions
                .saturating_add(stats.total_completions);
            overview.best_streak = overview.best_streak.max(stats.longest_streak);
            rate_sum += u64::from(stats.completion_rate);
        }
        overview.average_completion_rate =
            (rate_sum as f64 / habits.len() as f64).round() as u32;
        overview
    }
}
