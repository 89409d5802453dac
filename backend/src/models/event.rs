//! Event logging for game sessions.
//!
//! This module defines the Event enum which captures every significant
//! thing that happens during a game. Events enable:
//! - Replay checks (same seed and allocations → same event log)
//! - Debugging (what happened on which turn)
//! - Presentation (a UI can render the log however it likes)
//!
//! # Event Types
//!
//! - **TurnResolved**: a turn's returns were booked
//! - **MarketEventApplied**: a catalog event fired
//! - **RiskShock**: a region's risk roll hit
//! - **AchievementUnlocked** / **RewardUnlocked**: milestones reached
//! - **GameFinished**: the last turn was played
//!
//! # Example
//!
//! ```rust
//! use portfolio_sim_core_rs::models::event::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::TurnResolved {
//!     turn: 1,
//!     balance: 1_072_000,
//!     diff: 72_000,
//!     pre_event_diff: 72_000,
//! });
//!
//! assert_eq!(log.events_at_turn(1).len(), 1);
//! assert_eq!(log.events()[0].event_type(), "TurnResolved");
//! ```

use serde::{Deserialize, Serialize};

use crate::style::PlayStyle;

/// Game event capturing a state change.
///
/// All events include a turn number for ordering. Events are logged in
/// the order they occur within a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Turn resolved and balance updated
    TurnResolved {
        turn: u32,
        balance: i64,
        diff: i64,
        pre_event_diff: i64,
    },

    /// Catalog event applied to the market
    MarketEventApplied {
        turn: u32,
        event_id: String,
        balance_change: i64,
    },

    /// Region shock from the risk roll
    RiskShock {
        turn: u32,
        instrument_id: String,
        shock_pct: f64,
    },

    /// Achievement condition met for the first time
    AchievementUnlocked { turn: u32, achievement_id: String },

    /// Unlockable earned with the final balance
    RewardUnlocked { turn: u32, unlockable_id: String },

    /// Last turn played
    GameFinished {
        turn: u32,
        final_balance: i64,
        style: PlayStyle,
    },
}

impl Event {
    /// Get the turn number when this event occurred
    pub fn turn(&self) -> u32 {
        match self {
            Event::TurnResolved { turn, .. } => *turn,
            Event::MarketEventApplied { turn, .. } => *turn,
            Event::RiskShock { turn, .. } => *turn,
            Event::AchievementUnlocked { turn, .. } => *turn,
            Event::RewardUnlocked { turn, .. } => *turn,
            Event::GameFinished { turn, .. } => *turn,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::TurnResolved { .. } => "TurnResolved",
            Event::MarketEventApplied { .. } => "MarketEventApplied",
            Event::RiskShock { .. } => "RiskShock",
            Event::AchievementUnlocked { .. } => "AchievementUnlocked",
            Event::RewardUnlocked { .. } => "RewardUnlocked",
            Event::GameFinished { .. } => "GameFinished",
        }
    }

    /// Get instrument ID if event relates to a specific instrument
    pub fn instrument_id(&self) -> Option<&str> {
        match self {
            Event::RiskShock { instrument_id, .. } => Some(instrument_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying game events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific turn
    pub fn events_at_turn(&self, turn: u32) -> Vec<&Event> {
        self.events.iter().filter(|e| e.turn() == turn).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }
}
