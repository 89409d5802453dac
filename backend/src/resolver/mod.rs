//! Turn resolver
//!
//! Single entry point per turn. Turns a balance, an allocation and the
//! current instrument state into a [`TurnResult`].
//!
//! # Turn steps
//!
//! ```text
//! 1. Sample every instrument with a non-zero share (id order) and book profit
//! 2. balance_after_returns = floor(balance + total_profit)
//! 3. Drift region parameters (interest, growth, risk toward baseline;
//!    a missing baseline is pinned to the pre-turn risk)
//! 4. Trigger policy → maybe select and apply one catalog event
//! 5. Clamp region risk to [0, 10] and floor interest at -1
//! 6. Diffs against the starting balance
//! 7. Emit the turn result
//! ```
//!
//! The step order fixes the order of random draws. Given the same
//! sequence of draws, a turn resolves to exactly the same result.

use std::collections::BTreeMap;

use crate::events::{EventCatalog, EventPolicy};
use crate::models::instrument::{InstrumentBook, MacroParams, ReturnProfile};
use crate::models::turn::{InstrumentDetail, LogEntry, TurnResult};
use crate::models::Allocation;
use crate::returns::{round_one_decimal, sample_return};
use crate::rng::RandomSource;

/// Half-width of the per-turn drift applied to region interest and growth
pub const DRIFT_RANGE: f64 = 0.25;

/// How far region risk moves back toward its baseline each turn
pub const RISK_REVERSION_STEP: f64 = 0.2;

/// Resolves turns against one event catalog and trigger policy
///
/// # Example
///
/// ```rust
/// use portfolio_sim_core_rs::models::instrument::fund_instruments;
/// use portfolio_sim_core_rs::rng::SequenceRng;
/// use portfolio_sim_core_rs::{Allocation, TurnResolver};
///
/// let resolver = TurnResolver::funds();
/// let funds = fund_instruments();
///
/// // Stable fund: magnitude 0.8 → 4.2%, sign 0.7 → positive, trigger 0.9 → no event
/// let mut rng = SequenceRng::new(vec![0.8, 0.7, 0.9], 0.9);
/// let result = resolver.resolve_turn(1_000_000, &Allocation::all_in("A"), &funds, 1, &mut rng);
///
/// assert!((result.last_diff - 72_000).abs() <= 1);
/// assert!(result.random_event.is_none());
/// assert_eq!(result.new_instruments, funds);
/// ```
#[derive(Debug, Clone)]
pub struct TurnResolver {
    catalog: EventCatalog,
    policy: EventPolicy,
}

impl TurnResolver {
    /// Create a resolver from a catalog and trigger policy
    pub fn new(catalog: EventCatalog, policy: EventPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Fund market: fund catalog, 30% gated trigger
    pub fn funds() -> Self {
        Self::new(EventCatalog::funds(), EventPolicy::gated())
    }

    /// Region market: region catalog, an event every turn
    pub fn regions() -> Self {
        Self::new(EventCatalog::regions(), EventPolicy::Unconditional)
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> EventPolicy {
        self.policy
    }

    /// Resolve one turn
    ///
    /// # Arguments
    ///
    /// * `balance` - Balance at the start of the turn
    /// * `allocations` - Percent of balance per instrument; missing ids are 0%
    /// * `instruments` - Current instrument state (not modified)
    /// * `turn` - 1-based turn number, used for log entries
    /// * `rng` - Source of every random draw in the turn
    ///
    /// Allocation ids that match no instrument are ignored.
    pub fn resolve_turn<R: RandomSource + ?Sized>(
        &self,
        balance: i64,
        allocations: &Allocation,
        instruments: &InstrumentBook,
        turn: u32,
        rng: &mut R,
    ) -> TurnResult {
        let mut turn_log = Vec::new();
        let mut instrument_details = BTreeMap::new();

        // STEP 1: RETURNS
        let mut total_profit = 0.0;
        for (id, instrument) in instruments {
            let share = allocations.share(id);
            if share <= 0.0 {
                instrument_details.insert(
                    id.clone(),
                    InstrumentDetail {
                        name: instrument.name.clone(),
                        profit: 0,
                        return_rate: 0.0,
                    },
                );
                continue;
            }

            let invested = balance as f64 * (share / 100.0);
            let sample = sample_return(&instrument.profile, rng);

            if let Some(shock) = sample.shock {
                turn_log.push(LogEntry::Risk {
                    turn,
                    instrument_id: id.clone(),
                    instrument_name: instrument.name.clone(),
                    shock_pct: round_one_decimal(shock * 100.0),
                });
            }

            let profit = invested * sample.rate;
            total_profit += profit;

            instrument_details.insert(
                id.clone(),
                InstrumentDetail {
                    name: instrument.name.clone(),
                    profit: profit.floor() as i64,
                    return_rate: round_one_decimal(sample.rate * 100.0),
                },
            );
        }

        // STEP 2: BOOK RETURNS
        let balance_after_returns = (balance as f64 + total_profit).floor() as i64;

        // STEP 3: REGION DRIFT
        let mut state = instruments.clone();
        for instrument in state.values_mut() {
            if let ReturnProfile::Macro(params) = &mut instrument.profile {
                if params.baseline_risk.is_none() {
                    params.baseline_risk = Some(params.risk);
                }
                drift(params, rng);
            }
        }

        // STEP 4: EVENT
        let mut final_balance = balance_after_returns;
        let mut random_event = None;

        if self.policy.fires(rng) {
            let event = self.catalog.select(rng);
            let outcome = event.apply(&state, balance_after_returns, allocations);

            turn_log.push(LogEntry::Event {
                turn,
                event_id: event.id.clone(),
                title: event.title.clone(),
                balance_change: outcome.balance_change,
            });

            state = outcome.instruments;
            final_balance = outcome.balance;
            random_event = Some(event.clone());
        }

        // STEP 5: CLAMP
        for instrument in state.values_mut() {
            if let Some(params) = instrument.profile.macro_params_mut() {
                params.clamp();
            }
        }

        // STEP 6-7: DIFFS AND RESULT
        TurnResult {
            new_balance: final_balance,
            last_diff: final_balance.saturating_sub(balance),
            pre_event_diff: balance_after_returns.saturating_sub(balance),
            turn_log,
            random_event,
            new_instruments: state,
            instrument_details,
        }
    }
}

/// Per-turn random walk of a region's parameters
///
/// Two draws: interest, then growth. Risk moves deterministically toward
/// the baseline without overshooting it.
fn drift<R: RandomSource + ?Sized>(params: &mut MacroParams, rng: &mut R) {
    params.interest += rng.uniform(-DRIFT_RANGE, DRIFT_RANGE);
    params.growth += rng.uniform(-DRIFT_RANGE, DRIFT_RANGE);

    let gap = params.baseline() - params.risk;
    params.risk += gap.clamp(-RISK_REVERSION_STEP, RISK_REVERSION_STEP);
}
