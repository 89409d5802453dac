//! Play-style classification
//!
//! Summarizes a whole history into one label by averaging allocation
//! shares over every played turn. Instruments are grouped into three
//! roles (aggressive, indexed, stable); a role's share is the sum of its
//! instruments' shares.
//!
//! Rules, first match wins:
//!
//! ```text
//! aggressive mean >= 60  → HighRiskHighReturn
//! indexed mean    >= 50  → LowVolatilityIndexed
//! stable mean     >= 60  → Conservative
//! otherwise              → Balanced
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::instrument::{InstrumentBook, Strategy};
use crate::models::{Allocation, HistoryEntry};

/// Mean aggressive share that marks a high-risk player
pub const AGGRESSIVE_THRESHOLD: f64 = 60.0;

/// Mean indexed share that marks an index investor
pub const INDEXED_THRESHOLD: f64 = 50.0;

/// Mean stable share that marks a conservative player
pub const STABLE_THRESHOLD: f64 = 60.0;

/// Narrative classification of a player's allocation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStyle {
    /// No played turns to judge
    InsufficientData,
    HighRiskHighReturn,
    LowVolatilityIndexed,
    Conservative,
    Balanced,
}

impl PlayStyle {
    /// Short English label
    pub fn label(&self) -> &'static str {
        match self {
            PlayStyle::InsufficientData => "Not enough data",
            PlayStyle::HighRiskHighReturn => "High risk, high return",
            PlayStyle::LowVolatilityIndexed => "Low volatility, indexed",
            PlayStyle::Conservative => "Conservative",
            PlayStyle::Balanced => "Balanced and diversified",
        }
    }
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps instruments to roles and classifies histories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleClassifier {
    pub aggressive: Vec<String>,
    pub indexed: Vec<String>,
    pub stable: Vec<String>,
}

impl Default for StyleClassifier {
    /// Roles of the starting funds: C aggressive, B indexed, A stable
    fn default() -> Self {
        Self {
            aggressive: vec!["C".to_string()],
            indexed: vec!["B".to_string()],
            stable: vec!["A".to_string()],
        }
    }
}

impl StyleClassifier {
    /// Derive roles from instrument strategies
    ///
    /// Region instruments have no role and never push a history toward
    /// any rule.
    pub fn from_book(instruments: &InstrumentBook) -> Self {
        let ids_with = |strategy: Strategy| -> Vec<String> {
            instruments
                .values()
                .filter(|instrument| instrument.strategy() == strategy)
                .map(|instrument| instrument.id.clone())
                .collect()
        };

        Self {
            aggressive: ids_with(Strategy::Aggressive),
            indexed: ids_with(Strategy::Balanced),
            stable: ids_with(Strategy::Stable),
        }
    }

    /// Classify a history
    ///
    /// The initial snapshot and any entry without an allocation are
    /// ignored.
    ///
    /// # Example
    /// ```
    /// use portfolio_sim_core_rs::style::{PlayStyle, StyleClassifier};
    /// use portfolio_sim_core_rs::{Allocation, HistoryEntry};
    ///
    /// let classifier = StyleClassifier::default();
    /// let history = vec![
    ///     HistoryEntry::initial(1_000_000),
    ///     HistoryEntry::played(1, 1_100_000, Allocation::from([("B", 30.0), ("C", 70.0)])),
    /// ];
    ///
    /// assert_eq!(classifier.classify(&history), PlayStyle::HighRiskHighReturn);
    /// ```
    pub fn classify(&self, history: &[HistoryEntry]) -> PlayStyle {
        let played: Vec<&Allocation> = history
            .iter()
            .filter(|entry| entry.turn > 0)
            .filter_map(|entry| entry.allocations.as_ref())
            .collect();

        if played.is_empty() {
            return PlayStyle::InsufficientData;
        }

        let mean = |ids: &[String]| -> f64 {
            let total: f64 = played
                .iter()
                .map(|allocation| ids.iter().map(|id| allocation.share(id)).sum::<f64>())
                .sum();
            total / played.len() as f64
        };

        if mean(&self.aggressive) >= AGGRESSIVE_THRESHOLD {
            PlayStyle::HighRiskHighReturn
        } else if mean(&self.indexed) >= INDEXED_THRESHOLD {
            PlayStyle::LowVolatilityIndexed
        } else if mean(&self.stable) >= STABLE_THRESHOLD {
            PlayStyle::Conservative
        } else {
            PlayStyle::Balanced
        }
    }
}

/// Classify a fund history with the default roles
pub fn classify_style(history: &[HistoryEntry]) -> PlayStyle {
    StyleClassifier::default().classify(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::instrument::{fund_instruments, region_instruments};

    fn history_of(allocations: &[Allocation]) -> Vec<HistoryEntry> {
        let mut history = vec![HistoryEntry::initial(1_000_000)];
        for (i, allocation) in allocations.iter().enumerate() {
            history.push(HistoryEntry::played(i as u32 + 1, 1_000_000, allocation.clone()));
        }
        history
    }

    #[test]
    fn test_only_initial_entry_is_insufficient() {
        assert_eq!(
            classify_style(&[HistoryEntry::initial(1_000_000)]),
            PlayStyle::InsufficientData
        );
        assert_eq!(classify_style(&[]), PlayStyle::InsufficientData);
    }

    #[test]
    fn test_rule_precedence() {
        let indexed = history_of(&[Allocation::from([("B", 60.0), ("A", 40.0)])]);
        assert_eq!(classify_style(&indexed), PlayStyle::LowVolatilityIndexed);

        let conservative = history_of(&[Allocation::from([("A", 70.0), ("B", 30.0)])]);
        assert_eq!(classify_style(&conservative), PlayStyle::Conservative);

        let balanced = history_of(&[Allocation::from([("A", 34.0), ("B", 33.0), ("C", 33.0)])]);
        assert_eq!(classify_style(&balanced), PlayStyle::Balanced);
    }

    #[test]
    fn test_mean_across_turns_with_missing_keys() {
        // C: (100 + 0 + 80) / 3 = 60
        let history = history_of(&[
            Allocation::all_in("C"),
            Allocation::all_in("A"),
            Allocation::from([("C", 80.0), ("A", 20.0)]),
        ]);
        assert_eq!(classify_style(&history), PlayStyle::HighRiskHighReturn);
    }

    #[test]
    fn test_roles_from_book() {
        let classifier = StyleClassifier::from_book(&fund_instruments());
        assert_eq!(classifier, StyleClassifier::default());

        let regions = StyleClassifier::from_book(&region_instruments());
        assert!(regions.aggressive.is_empty());
        let history = history_of(&[Allocation::all_in("asia")]);
        assert_eq!(regions.classify(&history), PlayStyle::Balanced);
    }
}
