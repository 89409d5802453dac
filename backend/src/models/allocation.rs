//! Allocation: percent of balance per instrument for one turn
//!
//! The core never validates an allocation. Missing ids read as 0%, and
//! ids that match no instrument are ignored by the resolver. The game
//! session validates before resolving.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance used when comparing shares
pub const SHARE_EPSILON: f64 = 1e-9;

/// Mapping from instrument id to percent of balance
///
/// # Example
/// ```
/// use portfolio_sim_core_rs::Allocation;
///
/// let allocation = Allocation::from([("A", 50.0), ("B", 50.0)]);
/// assert_eq!(allocation.share("A"), 50.0);
/// assert_eq!(allocation.share("C"), 0.0);
/// assert_eq!(allocation.total(), 100.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<String, f64>);

impl Allocation {
    /// Empty allocation (everything held as cash)
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything in a single instrument
    pub fn all_in(id: impl Into<String>) -> Self {
        let mut allocation = Self::new();
        allocation.set(id, 100.0);
        allocation
    }

    /// Set the share for an instrument
    pub fn set(&mut self, id: impl Into<String>, percent: f64) {
        self.0.insert(id.into(), percent);
    }

    /// Share for an instrument, 0 when absent
    pub fn share(&self, id: &str) -> f64 {
        self.0.get(id).copied().unwrap_or(0.0)
    }

    /// Sum of all shares
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Whether `id` holds exactly `percent`
    pub fn is_concentrated(&self, id: &str, percent: f64) -> bool {
        (self.share(id) - percent).abs() < SHARE_EPSILON
    }

    /// Iterate `(id, share)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(id, share)| (id.as_str(), *share))
    }

    /// Instrument ids mentioned by this allocation
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for Allocation {
    fn from(entries: [(K, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, share)| (id.into(), share)).collect())
    }
}
