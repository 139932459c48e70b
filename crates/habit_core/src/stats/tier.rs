//! Streak-length feedback tiers.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Ordered feedback tier for a streak length, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    Sprout,
    Building,
    Star,
    Lightning,
    Fire,
    Diamond,
    Legendary,
}

/// Inclusive lower bounds, checked from the highest tier down.
const TIER_THRESHOLDS: [(i64, StreakTier); 6] = [
    (100, StreakTier::Legendary),
    (50, StreakTier::Diamond),
    (30, StreakTier::Fire),
    (14, StreakTier::Lightning),
    (7, StreakTier::Star),
    (3, StreakTier::Building),
];

/// Classifies a streak length. Total over all integers; negatives map to
/// `Sprout`.
pub fn streak_tier(streak: i64) -> StreakTier {
    TIER_THRESHOLDS
        .iter()
        .find(|(min, _)| streak >= *min)
        .map_or(StreakTier::Sprout, |(_, tier)| *tier)
}

impl StreakTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sprout => "sprout",
            Self::Building => "building",
            Self::Star => "star",
            Self::Lightning => "lightning",
            Self::Fire => "fire",
            Self::Diamond => "diamond",
            Self::Legendary => "legendary",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Sprout => "🌱",
            Self::Building => "💪",
            Self::Star => "🌟",
            Self::Lightning => "⚡",
            Self::Fire => "🔥",
            Self::Diamond => "💎",
            Self::Legendary => "🏆",
        }
    }
}

impl Display for StreakTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{streak_tier, StreakTier};

    #[test]
    fn boundaries_map_to_expected_tiers() {
        let cases = [
            (0, "sprout"),
            (2, "sprout"),
            (3, "building"),
            (6, "building"),
            (7, "star"),
            (13, "star"),
            (14, "lightning"),
            (29, "lightning"),
            (30, "fire"),
            (49, "fire"),
            (50, "diamond"),
            (99, "diamond"),
            (100, "legendary"),
            (10_000, "legendary"),
        ];
        for (streak, label) in cases {
            assert_eq!(streak_tier(streak).label(), label, "streak {streak}");
        }
    }

    #[test]
    fn negative_input_is_lowest_tier() {
        assert_eq!(streak_tier(-1), StreakTier::Sprout);
        assert_eq!(streak_tier(i64::MIN), StreakTier::Sprout);
    }

    #[test]
    fn tiers_are_ordered_and_carry_emoji() {
        assert!(StreakTier::Legendary > StreakTier::Diamond);
        assert!(StreakTier::Building > StreakTier::Sprout);
        assert_eq!(streak_tier(100).emoji(), "🏆");
        assert_eq!(streak_tier(0).emoji(), "🌱");
        assert_eq!(streak_tier(7).to_string(), "star");
    }
}
