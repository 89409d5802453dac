//! Turn history
//!
//! Entry 0 is the initial state and carries no allocation. Every later
//! entry records the balance after that turn and the allocation used.
//! The game session owns and appends to the history; evaluators only
//! read it.

use serde::{Deserialize, Serialize};

use super::allocation::Allocation;

/// One snapshot in the turn history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Turn number (0 for the initial snapshot)
    pub turn: u32,

    /// Balance at the end of this turn
    pub balance: i64,

    /// Allocation used during this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocations: Option<Allocation>,
}

impl HistoryEntry {
    /// Initial snapshot, before any turn is played
    pub fn initial(balance: i64) -> Self {
        Self {
            turn: 0,
            balance,
            allocations: None,
        }
    }

    /// Snapshot after a played turn
    pub fn played(turn: u32, balance: i64, allocations: Allocation) -> Self {
        Self {
            turn,
            balance,
            allocations: Some(allocations),
        }
    }
}

/// Allocations of played turns, skipping entries that carry none
pub fn played_allocations(history: &[HistoryEntry]) -> impl Iterator<Item = &Allocation> {
    history.iter().filter_map(|entry| entry.allocations.as_ref())
}
