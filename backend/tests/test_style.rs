//! Tests for play-style classification

use portfolio_sim_core_rs::models::instrument::fund_instruments;
use portfolio_sim_core_rs::style::StyleClassifier;
use portfolio_sim_core_rs::{classify_style, Allocation, HistoryEntry, PlayStyle};

fn history_of(allocations: Vec<Allocation>) -> Vec<HistoryEntry> {
    let mut history = vec![HistoryEntry::initial(1_000_000)];
    for (i, allocation) in allocations.into_iter().enumerate() {
        history.push(HistoryEntry::played(i as u32 + 1, 1_000_000, allocation));
    }
    history
}

#[test]
fn test_aggressive_rule_wins_over_indexed() {
    // C mean 70, B mean 55: both rules hold, aggressive comes first
    let history = history_of(vec![
        Allocation::from([("C", 70.0), ("B", 30.0)]),
        Allocation::from([("C", 70.0), ("B", 80.0)]),
    ]);

    assert_eq!(classify_style(&history), PlayStyle::HighRiskHighReturn);
}

#[test]
fn test_thresholds_are_inclusive() {
    let indexed = history_of(vec![Allocation::from([("B", 50.0), ("A", 50.0)])]);
    assert_eq!(classify_style(&indexed), PlayStyle::LowVolatilityIndexed);

    let conservative = history_of(vec![Allocation::from([("A", 60.0), ("C", 40.0)])]);
    assert_eq!(classify_style(&conservative), PlayStyle::Conservative);
}

#[test]
fn test_below_every_threshold_is_balanced() {
    let history = history_of(vec![
        Allocation::from([("A", 59.0), ("C", 41.0)]),
        Allocation::from([("B", 49.0), ("C", 51.0)]),
    ]);

    assert_eq!(classify_style(&history), PlayStyle::Balanced);
}

#[test]
fn test_no_played_turns() {
    assert_eq!(
        classify_style(&[HistoryEntry::initial(1_000_000)]),
        PlayStyle::InsufficientData
    );
}

#[test]
fn test_entries_without_allocations_are_skipped() {
    let mut history = history_of(vec![Allocation::all_in("C")]);
    history.push(HistoryEntry {
        turn: 2,
        balance: 1_000_000,
        allocations: None,
    });

    assert_eq!(classify_style(&history), PlayStyle::HighRiskHighReturn);
}

#[test]
fn test_classifier_from_fund_book_matches_default() {
    let classifier = StyleClassifier::from_book(&fund_instruments());
    let history = history_of(vec![Allocation::all_in("A")]);

    assert_eq!(classifier.classify(&history), classify_style(&history));
}

#[test]
fn test_labels() {
    assert_eq!(PlayStyle::HighRiskHighReturn.to_string(), "High risk, high return");
    assert_eq!(
        serde_json::to_string(&PlayStyle::LowVolatilityIndexed).unwrap(),
        "\"low_volatility_indexed\""
    );
}
