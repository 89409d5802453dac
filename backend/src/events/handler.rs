//! Event effect application
//!
//! Applies a [`MarketEvent`]'s effect to a copy of the instrument state
//! and to the post-return balance. Only the instruments an effect names
//! are read; the caller's book is never modified.

use crate::events::types::{EventEffect, MarketEvent, ParameterDelta};
use crate::models::instrument::{Instrument, InstrumentBook, ReturnProfile};
use crate::models::Allocation;

/// Result of applying an event effect
#[derive(Debug, Clone, PartialEq)]
pub struct EffectOutcome {
    /// Instrument state after the effect
    pub instruments: InstrumentBook,

    /// Balance after the effect, floored
    pub balance: i64,

    /// `balance` minus the balance passed in
    pub balance_change: i64,
}

impl MarketEvent {
    /// Apply this event to a copy of `instruments`
    ///
    /// # Arguments
    /// * `instruments` - Instrument state after returns and drift
    /// * `balance` - Balance after returns
    /// * `allocation` - Allocation used this turn
    ///
    /// # Example
    /// ```
    /// use portfolio_sim_core_rs::events::fund_events;
    /// use portfolio_sim_core_rs::models::instrument::fund_instruments;
    /// use portfolio_sim_core_rs::Allocation;
    ///
    /// let bubble = fund_events().into_iter().find(|e| e.id == "it_bubble_burst").unwrap();
    /// let funds = fund_instruments();
    /// let outcome = bubble.apply(&funds, 1_000_000, &Allocation::all_in("C"));
    ///
    /// assert_eq!(outcome.balance, 800_000);
    /// assert_eq!(funds, fund_instruments()); // input untouched
    /// ```
    pub fn apply(
        &self,
        instruments: &InstrumentBook,
        balance: i64,
        allocation: &Allocation,
    ) -> EffectOutcome {
        let mut next = instruments.clone();
        let mut change = 0.0;

        match &self.effect {
            EventEffect::Targeted { targets } => {
                for (id, delta) in targets {
                    if let Some(instrument) = next.get_mut(id) {
                        change += invested_change(balance, allocation.share(id), delta);
                        apply_delta(instrument, delta);
                    }
                }
            }
            EventEffect::Broad { delta } => {
                for (id, instrument) in next.iter_mut() {
                    change += invested_change(balance, allocation.share(id), delta);
                    apply_delta(instrument, delta);
                }
            }
        }

        let new_balance = (balance as f64 + change).floor() as i64;
        EffectOutcome {
            instruments: next,
            balance: new_balance,
            balance_change: new_balance.saturating_sub(balance),
        }
    }
}

/// Money gained or lost on one instrument's invested amount
fn invested_change(balance: i64, share: f64, delta: &ParameterDelta) -> f64 {
    if delta.invested_pct == 0.0 || share <= 0.0 {
        return 0.0;
    }
    let invested = balance as f64 * (share / 100.0);
    invested * (delta.invested_pct / 100.0)
}

/// Shift the instrument's return parameters by `delta`
fn apply_delta(instrument: &mut Instrument, delta: &ParameterDelta) {
    match &mut instrument.profile {
        ReturnProfile::Stable(params)
        | ReturnProfile::Balanced(params)
        | ReturnProfile::Aggressive(params) => {
            params.expected_return += delta.expected_return;
        }
        ReturnProfile::Macro(params) => {
            params.interest += delta.interest;
            params.growth += delta.growth;
            params.risk += delta.risk;
        }
    }
}
