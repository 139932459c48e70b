//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record persisted by the storage port.
//! - Validate user-editable fields before they enter the record store.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once and never change.
//! - `name` is non-empty after trimming.
//! - A missing completion key and a `false` value mean the same thing.
//!
//! # See also
//! - `crate::stats::engine` for the read-side projection.

use crate::calendar::is_valid_date_key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every habit record.
pub type HabitId = Uuid;

/// Calendar-date key in `YYYY-MM-DD` form.
pub type DateKey = String;

/// Sparse date→completed map. Iteration order is lexicographic, which equals
/// chronological order for well-formed keys.
pub type Completions = BTreeMap<DateKey, bool>;

/// Closed set of display groupings. Irrelevant to statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Health,
    Productivity,
    Learning,
    Social,
    Mindfulness,
    Creative,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 6] = [
        HabitCategory::Health,
        HabitCategory::Productivity,
        HabitCategory::Learning,
        HabitCategory::Social,
        HabitCategory::Mindfulness,
        HabitCategory::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Productivity => "productivity",
            Self::Learning => "learning",
            Self::Social => "social",
            Self::Mindfulness => "mindfulness",
            Self::Creative => "creative",
        }
    }

    /// Default display color used when the caller does not pick one.
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Health => "#10B981",
            Self::Productivity => "#3B82F6",
            Self::Learning => "#8B5CF6",
            Self::Social => "#EC4899",
            Self::Mindfulness => "#6366F1",
            Self::Creative => "#F59E0B",
        }
    }
}

impl Display for HabitCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitCategory {
    type Err = HabitValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| HabitValidationError::UnknownCategory(value.to_string()))
    }
}

/// Validation errors for habit fields and completion keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    EmptyName,
    InvalidDateKey(String),
    UnknownCategory(String),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name cannot be empty"),
            Self::InvalidDateKey(key) => {
                write!(f, "invalid date key `{key}`; expected YYYY-MM-DD")
            }
            Self::UnknownCategory(value) => write!(
                f,
                "unknown category `{value}`; expected health|productivity|learning|social|mindfulness|creative"
            ),
        }
    }
}

impl Error for HabitValidationError {}

/// User-editable habit fields, used for create and field-merge update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    pub name: String,
    pub category: HabitCategory,
    pub color: String,
}

impl HabitDraft {
    /// Creates a draft using the category's default color.
    pub fn new(name: impl Into<String>, category: HabitCategory) -> Self {
        Self {
            name: name.into(),
            category,
            color: category.default_color().to_string(),
        }
    }

    /// Returns a copy with a trimmed name, or an error if the name is blank.
    pub fn normalized(&self) -> Result<Self, HabitValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            category: self.category,
            color: self.color.trim().to_string(),
        })
    }
}

/// Canonical persisted habit record.
///
/// Field names serialize in camelCase so the stored blob keeps the shape
/// `{"id","name","category","color","createdAt","completions"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub id: HabitId,
    pub name: String,
    pub category: HabitCategory,
    pub color: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completions: Completions,
}

impl HabitRecord {
    /// Creates a record with a generated stable ID and no completions.
    pub fn new(draft: HabitDraft, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, created_at)
    }

    fn with_id(id: HabitId, draft: HabitDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            color: draft.color,
            created_at,
            completions: Completions::new(),
        }
    }

    /// Merges user-editable fields. Identity, timestamp and history are kept.
    pub fn apply_draft(&mut self, draft: HabitDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.color = draft.color;
    }

    /// Returns whether `date_key` is marked completed.
    pub fn is_completed_on(&self, date_key: &str) -> bool {
        self.completions.get(date_key).copied().unwrap_or(false)
    }

    /// Flips the completion flag at `date_key` and returns the new value.
    ///
    /// A missing key is treated as `false`, so the first toggle stores `true`.
    pub fn toggle_completion(&mut self, date_key: &str) -> Result<bool, HabitValidationError> {
        if !is_valid_date_key(date_key) {
            return Err(HabitValidationError::InvalidDateKey(date_key.to_string()));
        }
        let next = !self.is_completed_on(date_key);
        self.completions.insert(date_key.to_string(), next);
        Ok(next)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HabitCategory, HabitDraft, HabitRecord, HabitValidationError};
    use chrono::{TimeZone, Utc};

    fn sample() -> HabitRecord {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        HabitRecord::new(
            HabitDraft::new("Read 20 pages", HabitCategory::Learning),
            created_at,
        )
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            " Mindfulness ".parse::<HabitCategory>().unwrap(),
            HabitCategory::Mindfulness
        );
        assert!(matches!(
            "sleep".parse::<HabitCategory>(),
            Err(HabitValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn draft_normalization_trims_and_rejects_blank_names() {
        let draft = HabitDraft::new("  Walk  ", HabitCategory::Health);
        assert_eq!(draft.normalized().unwrap().name, "Walk");

        let blank = HabitDraft::new("   ", HabitCategory::Health);
        assert_eq!(blank.normalized(), Err(HabitValidationError::EmptyName));
    }

    #[test]
    fn toggle_flips_missing_key_to_true_then_false() {
        let mut habit = sample();
        assert!(habit.toggle_completion("2024-01-10").unwrap());
        assert!(habit.is_completed_on("2024-01-10"));
        assert!(!habit.toggle_completion("2024-01-10").unwrap());
        assert_eq!(habit.completions.get("2024-01-10"), Some(&false));
    }

    #[test]
    fn toggle_rejects_malformed_keys() {
        let mut habit = sample();
        let err = habit.toggle_completion("2024-1-10").unwrap_err();
        assert_eq!(err, HabitValidationError::InvalidDateKey("2024-1-10".into()));
        assert!(habit.completions.is_empty());
    }

    #[test]
    fn apply_draft_keeps_identity_and_history() {
        let mut habit = sample();
        habit.toggle_completion("2024-01-02").unwrap();
        let id = habit.id;
        let created_at = habit.created_at;

        habit.apply_draft(HabitDraft::new("Read 30 pages", HabitCategory::Creative));

        assert_eq!(habit.id, id);
        assert_eq!(habit.created_at, created_at);
        assert_eq!(habit.name, "Read 30 pages");
        assert_eq!(habit.color, HabitCategory::Creative.default_color());
        assert!(habit.is_completed_on("2024-01-02"));
    }

    #[test]
    fn serializes_with_camel_case_created_at() {
        let habit = sample();
        let json = serde_json::to_value(&habit).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "learning");
        assert!(json["completions"].as_object().unwrap().is_empty());
    }
}
