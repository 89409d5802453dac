//! Achievements and unlockables
//!
//! Both are plain data: an id, display text, and a rule. Rules are pure
//! predicates. Nothing here remembers what has already been unlocked;
//! the game session polls after each turn and keeps that record itself.
//!
//! - Achievements look at `(history, current allocation, current turn)`.
//! - Unlockables look only at the final balance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::history::played_allocations;
use crate::models::{Allocation, HistoryEntry};

/// Condition behind an achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AchievementRule {
    /// Some history entry reached `threshold`
    BalanceAtLeast { threshold: i64 },

    /// The current allocation and the last `turns` played allocations all
    /// hold `instrument` at exactly `percent`
    SustainedAllocation {
        instrument: String,
        percent: f64,
        turns: usize,
    },

    /// At least `min_turns` played and the balance never went down
    NeverDecreased { min_turns: u32 },
}

impl AchievementRule {
    /// Evaluate the rule
    ///
    /// Entries without an allocation (the initial snapshot) are skipped
    /// wherever allocations are inspected.
    pub fn is_met(&self, history: &[HistoryEntry], allocation: &Allocation, turn: u32) -> bool {
        match self {
            AchievementRule::BalanceAtLeast { threshold } => {
                history.iter().any(|entry| entry.balance >= *threshold)
            }
            AchievementRule::SustainedAllocation {
                instrument,
                percent,
                turns,
            } => {
                if !allocation.is_concentrated(instrument, *percent) {
                    return false;
                }
                let played: Vec<&Allocation> = played_allocations(history).collect();
                if played.len() < *turns {
                    return false;
                }
                played[played.len() - turns..]
                    .iter()
                    .all(|past| past.is_concentrated(instrument, *percent))
            }
            AchievementRule::NeverDecreased { min_turns } => {
                turn >= *min_turns
                    && history
                        .windows(2)
                        .all(|pair| pair[1].balance >= pair[0].balance)
            }
        }
    }
}

/// A named milestone over the turn history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub condition: AchievementRule,
}

impl Achievement {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        condition: AchievementRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            condition,
        }
    }

    /// Whether the achievement's condition holds right now
    pub fn is_met(&self, history: &[HistoryEntry], allocation: &Allocation, turn: u32) -> bool {
        self.condition.is_met(history, allocation, turn)
    }
}

/// Condition behind an unlockable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum UnlockRule {
    /// Final balance reached `threshold`
    FinalBalanceAtLeast { threshold: i64 },
}

impl UnlockRule {
    pub fn is_met(&self, final_balance: i64) -> bool {
        match self {
            UnlockRule::FinalBalanceAtLeast { threshold } => final_balance >= *threshold,
        }
    }
}

/// A reward earned by finishing with enough money
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unlockable {
    pub id: String,
    pub name: String,
    pub description: String,
    pub condition: UnlockRule,
}

impl Unlockable {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        condition: UnlockRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            condition,
        }
    }

    pub fn is_met(&self, final_balance: i64) -> bool {
        self.condition.is_met(final_balance)
    }
}

/// Every achievement, keyed by id
///
/// # Example
/// ```
/// use portfolio_sim_core_rs::achievements::list_achievements;
/// use portfolio_sim_core_rs::{Allocation, HistoryEntry};
///
/// let achievements = list_achievements();
/// let history = vec![HistoryEntry::initial(1_000_000), HistoryEntry::played(1, 2_100_000, Allocation::all_in("C"))];
///
/// assert!(achievements["double_up"].is_met(&history, &Allocation::all_in("C"), 1));
/// assert!(!achievements["tycoon"].is_met(&history, &Allocation::all_in("C"), 1));
/// ```
pub fn list_achievements() -> BTreeMap<String, Achievement> {
    [
        Achievement::new(
            "double_up",
            "Double Up",
            "Reach a balance of 2,000,000.",
            AchievementRule::BalanceAtLeast {
                threshold: 2_000_000,
            },
        ),
        Achievement::new(
            "tycoon",
            "Tycoon",
            "Reach a balance of 10,000,000.",
            AchievementRule::BalanceAtLeast {
                threshold: 10_000_000,
            },
        ),
        Achievement::new(
            "all_in",
            "All In",
            "Keep everything in the gamble fund for 10 turns straight.",
            AchievementRule::SustainedAllocation {
                instrument: "C".to_string(),
                percent: 100.0,
                turns: 10,
            },
        ),
        Achievement::new(
            "steady_saver",
            "Steady Saver",
            "Keep everything in the stable fund for 10 turns straight.",
            AchievementRule::SustainedAllocation {
                instrument: "A".to_string(),
                percent: 100.0,
                turns: 10,
            },
        ),
        Achievement::new(
            "unbroken_streak",
            "Unbroken Streak",
            "Play 10 turns without your balance ever going down.",
            AchievementRule::NeverDecreased { min_turns: 10 },
        ),
    ]
    .into_iter()
    .map(|achievement| (achievement.id.clone(), achievement))
    .collect()
}

/// Every unlockable, keyed by id
pub fn list_unlockables() -> BTreeMap<String, Unlockable> {
    [
        Unlockable::new(
            "analyst_report",
            "Analyst Report",
            "A tip about next turn's market.",
            UnlockRule::FinalBalanceAtLeast {
                threshold: 1_050_000,
            },
        ),
        Unlockable::new(
            "advanced_stable_fund",
            "Advanced Stable Fund",
            "A sharper version of the stable fund.",
            UnlockRule::FinalBalanceAtLeast {
                threshold: 1_200_000,
            },
        ),
        Unlockable::new(
            "advanced_balanced_fund",
            "Advanced Balanced Fund",
            "A sharper version of the balanced fund.",
            UnlockRule::FinalBalanceAtLeast {
                threshold: 1_500_000,
            },
        ),
    ]
    .into_iter()
    .map(|unlockable| (unlockable.id.clone(), unlockable))
    .collect()
}
