//! Orchestrator Engine
//!
//! A game session: owns the balance, the instrument state, the history
//! and the seeded RNG, and drives the turn resolver once per turn.
//!
//! # Architecture
//!
//! ```text
//! For each turn t:
//! 1. Reject play after the last turn
//! 2. Validate the allocation (the resolver itself never does)
//! 3. Resolve the turn (returns, drift, event)
//! 4. Apply the result and append to history
//! 5. Log events
//! 6. Poll achievements
//! 7. On the last turn: unlockables, play style, GameFinished
//! ```
//!
//! # Example
//!
//! ```rust
//! use portfolio_sim_core_rs::orchestrator::{Orchestrator, OrchestratorConfig};
//! use portfolio_sim_core_rs::Allocation;
//!
//! let mut config = OrchestratorConfig::funds(12345);
//! config.max_turns = Some(10);
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//!
//! while !orchestrator.is_finished() {
//!     let allocation = Allocation::from([("A", 34.0), ("B", 33.0), ("C", 33.0)]);
//!     let result = orchestrator.play_turn(allocation).unwrap();
//!     assert_eq!(result.new_balance, orchestrator.balance());
//! }
//!
//! assert_eq!(orchestrator.history().len(), 11);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;

use crate::achievements::{list_achievements, list_unlockables, Achievement, Unlockable};
use crate::core::time::TurnClock;
use crate::events::{fund_events, region_events, CatalogError, EventCatalog, EventPolicy, MarketEvent};
use crate::models::allocation::SHARE_EPSILON;
use crate::models::event::{Event, EventLog};
use crate::models::instrument::{
    book_from, fund_instruments, region_instruments, Instrument, InstrumentBook, ReturnProfile,
    RISK_MAX, RISK_MIN,
};
use crate::models::turn::{LogEntry, TurnResult};
use crate::models::{Allocation, HistoryEntry};
use crate::resolver::TurnResolver;
use crate::rng::RngManager;
use crate::style::{PlayStyle, StyleClassifier};

/// Balance a game starts with unless configured otherwise
pub const DEFAULT_INITIAL_BALANCE: i64 = 1_000_000;

// ============================================================================
// Configuration Types
// ============================================================================

/// Which kind of market a game plays in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    /// Three funds with bounded fluctuation; events are gated at 30%
    #[default]
    Funds,

    /// Macro regions with drift and shocks; an event every turn
    Regions,
}

impl MarketKind {
    /// Starting instruments for this market
    pub fn default_instruments(&self) -> InstrumentBook {
        match self {
            MarketKind::Funds => fund_instruments(),
            MarketKind::Regions => region_instruments(),
        }
    }

    /// Trigger policy used unless overridden
    pub fn default_policy(&self) -> EventPolicy {
        match self {
            MarketKind::Funds => EventPolicy::gated(),
            MarketKind::Regions => EventPolicy::Unconditional,
        }
    }

    /// Built-in event list for this market
    pub fn default_events(&self) -> Vec<MarketEvent> {
        match self {
            MarketKind::Funds => fund_events(),
            MarketKind::Regions => region_events(),
        }
    }
}

/// Complete game configuration
///
/// Deserializable from JSON; every field except `rng_seed` has a default.
///
/// # Fields
///
/// * `rng_seed` - Seed for deterministic random number generation
/// * `initial_balance` - Money the player starts with
/// * `market` - Fund or region market
/// * `event_policy` - Trigger policy override
/// * `instruments` - Instrument override (defaults to the market preset)
/// * `max_turns` - Game length, `None` for open-ended play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// RNG seed for deterministic play
    pub rng_seed: u64,

    #[serde(default = "default_initial_balance")]
    pub initial_balance: i64,

    #[serde(default)]
    pub market: MarketKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_policy: Option<EventPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<Instrument>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
}

fn default_initial_balance() -> i64 {
    DEFAULT_INITIAL_BALANCE
}

impl OrchestratorConfig {
    /// Open-ended fund game with default settings
    pub fn funds(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            initial_balance: DEFAULT_INITIAL_BALANCE,
            market: MarketKind::Funds,
            event_policy: None,
            instruments: None,
            max_turns: None,
        }
    }

    /// Open-ended region game with default settings
    pub fn regions(rng_seed: u64) -> Self {
        Self {
            market: MarketKind::Regions,
            ..Self::funds(rng_seed)
        }
    }

    /// Trigger policy in effect
    pub fn effective_policy(&self) -> EventPolicy {
        self.event_policy
            .unwrap_or_else(|| self.market.default_policy())
    }
}

/// Simulation error types
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),

    #[error("Instrument not found: {0}")]
    UnknownInstrument(String),

    #[error("Game is over: all {max_turns} turns have been played")]
    GameOver { max_turns: u32 },

    #[error("Event catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// A running game
///
/// # Determinism
///
/// All randomness is via `rng_manager` with seeded xorshift64*.
/// Same seed + same config + same allocations = identical game.
pub struct Orchestrator {
    /// Current balance
    balance: i64,

    /// Current instrument state
    instruments: InstrumentBook,

    /// Entry 0 is the starting balance; one entry per played turn after that
    history: Vec<HistoryEntry>,

    /// Deterministic RNG
    rng_manager: RngManager,

    /// Catalog + trigger policy
    resolver: TurnResolver,

    /// Turn counting
    clock: TurnClock,

    achievements: BTreeMap<String, Achievement>,
    unlockables: BTreeMap<String, Unlockable>,
    unlocked_achievements: BTreeSet<String>,
    unlocked_rewards: BTreeSet<String>,

    /// Role mapping for the play-style summary
    style_classifier: StyleClassifier,

    /// Event log (all game events)
    event_log: EventLog,
}

impl Orchestrator {
    /// Create a new game from configuration, using the market's built-in
    /// event catalog
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Successfully initialized game
    /// * `Err(SimulationError)` - Configuration validation failed
    pub fn new(config: OrchestratorConfig) -> Result<Self, SimulationError> {
        let events = config.market.default_events();
        Self::with_events(config, events)
    }

    /// Create a new game with a custom event list
    ///
    /// # Errors
    ///
    /// `SimulationError::Catalog` if `events` is empty or has duplicate ids.
    pub fn with_events(
        config: OrchestratorConfig,
        events: Vec<MarketEvent>,
    ) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let catalog = EventCatalog::new(events)?;
        let resolver = TurnResolver::new(catalog, config.effective_policy());

        let mut instruments = match config.instruments {
            Some(list) => book_from(list),
            None => config.market.default_instruments(),
        };
        for instrument in instruments.values_mut() {
            if let Some(params) = instrument.profile.macro_params_mut() {
                if params.baseline_risk.is_none() {
                    params.baseline_risk = Some(params.risk);
                }
            }
        }

        Ok(Self {
            balance: config.initial_balance,
            style_classifier: StyleClassifier::from_book(&instruments),
            instruments,
            history: vec![HistoryEntry::initial(config.initial_balance)],
            rng_manager: RngManager::new(config.rng_seed),
            resolver,
            clock: TurnClock::new(config.max_turns),
            achievements: list_achievements(),
            unlockables: list_unlockables(),
            unlocked_achievements: BTreeSet::new(),
            unlocked_rewards: BTreeSet::new(),
            event_log: EventLog::new(),
        })
    }

    /// Validate configuration
    fn validate_config(config: &OrchestratorConfig) -> Result<(), SimulationError> {
        if config.initial_balance <= 0 {
            return Err(SimulationError::InvalidConfig(
                "initial_balance must be > 0".to_string(),
            ));
        }

        if config.max_turns == Some(0) {
            return Err(SimulationError::InvalidConfig(
                "max_turns must be > 0".to_string(),
            ));
        }

        if let Some(EventPolicy::Gated { probability }) = config.event_policy {
            if !(0.0..=1.0).contains(&probability) {
                return Err(SimulationError::InvalidConfig(format!(
                    "event probability must be within [0, 1], got {}",
                    probability
                )));
            }
        }

        let Some(instruments) = &config.instruments else {
            return Ok(());
        };

        if instruments.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "Must have at least one instrument".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for instrument in instruments {
            if !ids.insert(&instrument.id) {
                return Err(SimulationError::InvalidConfig(format!(
                    "Duplicate instrument ID: {}",
                    instrument.id
                )));
            }

            match &instrument.profile {
                ReturnProfile::Stable(params)
                | ReturnProfile::Balanced(params)
                | ReturnProfile::Aggressive(params) => {
                    if params.fluctuation.min > params.fluctuation.max {
                        return Err(SimulationError::InvalidConfig(format!(
                            "Instrument {}: fluctuation min {} exceeds max {}",
                            instrument.id, params.fluctuation.min, params.fluctuation.max
                        )));
                    }
                }
                ReturnProfile::Macro(params) => {
                    if !(RISK_MIN..=RISK_MAX).contains(&params.risk) {
                        return Err(SimulationError::InvalidConfig(format!(
                            "Instrument {}: risk {} outside [{}, {}]",
                            instrument.id, params.risk, RISK_MIN, RISK_MAX
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Reject allocations the resolver would silently tolerate
    fn validate_allocation(&self, allocation: &Allocation) -> Result<(), SimulationError> {
        for (id, share) in allocation.iter() {
            if !share.is_finite() || share < 0.0 {
                return Err(SimulationError::InvalidAllocation(format!(
                    "share for {} must be a non-negative number, got {}",
                    id, share
                )));
            }
            if !self.instruments.contains_key(id) {
                return Err(SimulationError::UnknownInstrument(id.to_string()));
            }
        }

        let total = allocation.total();
        if total > 100.0 + SHARE_EPSILON {
            return Err(SimulationError::InvalidAllocation(format!(
                "shares sum to {}, more than 100",
                total
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current balance
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Current instrument state
    pub fn instruments(&self) -> &InstrumentBook {
        &self.instruments
    }

    /// Full history, initial snapshot first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Turns played so far
    pub fn current_turn(&self) -> u32 {
        self.clock.current_turn()
    }

    /// Turns left, if the game has a length
    pub fn turns_remaining(&self) -> Option<u32> {
        self.clock.turns_remaining()
    }

    /// Whether the last turn has been played
    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    /// Resolver in use (catalog and trigger policy)
    pub fn resolver(&self) -> &TurnResolver {
        &self.resolver
    }

    /// Achievements polled after every turn
    pub fn achievements(&self) -> &BTreeMap<String, Achievement> {
        &self.achievements
    }

    /// Ids of achievements reached so far
    pub fn unlocked_achievements(&self) -> &BTreeSet<String> {
        &self.unlocked_achievements
    }

    /// Ids of rewards earned at the end of the game
    pub fn unlocked_rewards(&self) -> &BTreeSet<String> {
        &self.unlocked_rewards
    }

    /// Get reference to event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Play style over the history so far
    pub fn play_style(&self) -> PlayStyle {
        self.style_classifier.classify(&self.history)
    }

    /// Current RNG state (for replay)
    pub fn rng_state(&self) -> u64 {
        self.rng_manager.get_state()
    }

    // ========================================================================
    // Turn Loop Implementation
    // ========================================================================

    /// Play one turn with the given allocation
    ///
    /// # Returns
    ///
    /// * `Ok(TurnResult)` - Turn played and applied
    /// * `Err(SimulationError)` - Game over or allocation rejected; state
    ///   is left untouched
    pub fn play_turn(&mut self, allocation: Allocation) -> Result<TurnResult, SimulationError> {
        // STEP 1: GAME OVER CHECK
        if self.clock.is_finished() {
            return Err(SimulationError::GameOver {
                max_turns: self.clock.current_turn(),
            });
        }

        // STEP 2: VALIDATION
        self.validate_allocation(&allocation)?;

        // STEP 3: RESOLVE
        let turn = self.clock.next_turn();
        let result = self.resolver.resolve_turn(
            self.balance,
            &allocation,
            &self.instruments,
            turn,
            &mut self.rng_manager,
        );

        // STEP 4: APPLY
        self.balance = result.new_balance;
        self.instruments = result.new_instruments.clone();
        self.history
            .push(HistoryEntry::played(turn, self.balance, allocation.clone()));
        self.clock.advance();

        // STEP 5: LOG
        for entry in &result.turn_log {
            self.event_log.log(match entry {
                LogEntry::Risk {
                    turn,
                    instrument_id,
                    shock_pct,
                    ..
                } => Event::RiskShock {
                    turn: *turn,
                    instrument_id: instrument_id.clone(),
                    shock_pct: *shock_pct,
                },
                LogEntry::Event {
                    turn,
                    event_id,
                    balance_change,
                    ..
                } => Event::MarketEventApplied {
                    turn: *turn,
                    event_id: event_id.clone(),
                    balance_change: *balance_change,
                },
            });
        }
        self.event_log.log(Event::TurnResolved {
            turn,
            balance: result.new_balance,
            diff: result.last_diff,
            pre_event_diff: result.pre_event_diff,
        });

        // STEP 6: ACHIEVEMENTS
        for (id, achievement) in &self.achievements {
            if self.unlocked_achievements.contains(id) {
                continue;
            }
            if achievement.is_met(&self.history, &allocation, turn) {
                self.unlocked_achievements.insert(id.clone());
                self.event_log.log(Event::AchievementUnlocked {
                    turn,
                    achievement_id: id.clone(),
                });
            }
        }

        // STEP 7: END OF GAME
        if self.clock.is_finished() {
            self.handle_end_of_game(turn);
        }

        Ok(result)
    }

    /// Award unlockables and record the final summary
    fn handle_end_of_game(&mut self, turn: u32) {
        for (id, unlockable) in &self.unlockables {
            if unlockable.is_met(self.balance) && self.unlocked_rewards.insert(id.clone()) {
                self.event_log.log(Event::RewardUnlocked {
                    turn,
                    unlockable_id: id.clone(),
                });
            }
        }

        self.event_log.log(Event::GameFinished {
            turn,
            final_balance: self.balance,
            style: self.style_classifier.classify(&self.history),
        });
    }
}

// Manual Debug implementation (keeps output short)
impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("current_turn", &self.current_turn())
            .field("balance", &self.balance)
            .field("num_instruments", &self.instruments.len())
            .field("event_count", &self.event_log.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
