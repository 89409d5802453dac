//! Tests for achievement and unlockable predicates

use portfolio_sim_core_rs::achievements::{AchievementRule, UnlockRule};
use portfolio_sim_core_rs::{list_achievements, list_unlockables, Allocation, HistoryEntry};

/// Initial snapshot plus `turns` played turns with the same allocation
fn history_of(turns: u32, allocation: &Allocation, balance: i64) -> Vec<HistoryEntry> {
    let mut history = vec![HistoryEntry::initial(1_000_000)];
    for turn in 1..=turns {
        history.push(HistoryEntry::played(turn, balance, allocation.clone()));
    }
    history
}

#[test]
fn test_all_in_needs_ten_turns() {
    let achievements = list_achievements();
    let all_in = &achievements["all_in"];
    let c = Allocation::all_in("C");

    let ten = history_of(10, &c, 1_000_000);
    assert!(all_in.is_met(&ten, &c, 10));

    let nine = history_of(9, &c, 1_000_000);
    assert!(!all_in.is_met(&nine, &c, 9));
}

#[test]
fn test_all_in_broken_by_one_turn() {
    let achievements = list_achievements();
    let c = Allocation::all_in("C");

    let mut history = history_of(10, &c, 1_000_000);
    history[5].allocations = Some(Allocation::from([("C", 99.0), ("A", 1.0)]));

    assert!(!achievements["all_in"].is_met(&history, &c, 10));
}

#[test]
fn test_steady_saver_ignores_initial_entry() {
    let achievements = list_achievements();
    let a = Allocation::all_in("A");
    let history = history_of(10, &a, 1_000_000);

    assert!(history[0].allocations.is_none());
    assert!(achievements["steady_saver"].is_met(&history, &a, 10));
}

#[test]
fn test_balance_thresholds_scan_history() {
    let achievements = list_achievements();
    let a = Allocation::all_in("A");

    let mut history = history_of(3, &a, 1_000_000);
    history[2].balance = 2_000_000;

    assert!(achievements["double_up"].is_met(&history, &a, 3));
    assert!(!achievements["tycoon"].is_met(&history, &a, 3));
}

#[test]
fn test_unbroken_streak() {
    let achievements = list_achievements();
    let streak = &achievements["unbroken_streak"];
    let a = Allocation::all_in("A");

    let mut history = vec![HistoryEntry::initial(1_000_000)];
    for turn in 1..=10 {
        history.push(HistoryEntry::played(turn, 1_000_000 + turn as i64 * 1_000, a.clone()));
    }
    assert!(streak.is_met(&history, &a, 10));
    assert!(!streak.is_met(&history[..10], &a, 9));

    history[4].balance = 999_000;
    assert!(!streak.is_met(&history, &a, 10));
}

#[test]
fn test_flat_balance_counts_as_unbroken() {
    let rule = AchievementRule::NeverDecreased { min_turns: 10 };
    let a = Allocation::all_in("A");

    assert!(rule.is_met(&history_of(12, &a, 1_000_000), &a, 12));
}

#[test]
fn test_unlockables_at_thresholds() {
    let unlockables = list_unlockables();
    assert_eq!(unlockables.len(), 3);

    let earned: Vec<&str> = unlockables
        .values()
        .filter(|u| u.is_met(1_200_000))
        .map(|u| u.id.as_str())
        .collect();
    assert_eq!(earned, vec!["advanced_stable_fund", "analyst_report"]);

    assert!(!UnlockRule::FinalBalanceAtLeast { threshold: 1_050_000 }.is_met(1_049_999));
}

#[test]
fn test_rule_serde() {
    let rule: AchievementRule = serde_json::from_str(
        r#"{"rule": "sustained_allocation", "instrument": "B", "percent": 100.0, "turns": 3}"#,
    )
    .unwrap();

    assert_eq!(
        rule,
        AchievementRule::SustainedAllocation {
            instrument: "B".to_string(),
            percent: 100.0,
            turns: 3,
        }
    );
}
