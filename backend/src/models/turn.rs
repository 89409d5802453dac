//! Turn result types
//!
//! A [`TurnResult`] is produced once per turn by the resolver and never
//! modified afterwards. It owns a full copy of the instrument state, so
//! later turns cannot reach back into it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::events::MarketEvent;
use crate::models::instrument::InstrumentBook;

/// One entry of a turn's narrative log
///
/// Entries carry data, not prose; `Display` renders a plain English line
/// for tools that just want something readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    /// A region's risk roll hit and a shock was subtracted from its rate
    Risk {
        turn: u32,
        instrument_id: String,
        instrument_name: String,
        /// Shock size in percent, one decimal
        shock_pct: f64,
    },

    /// A market event was applied
    Event {
        turn: u32,
        event_id: String,
        title: String,
        /// Balance change caused by the event itself
        balance_change: i64,
    },
}

impl LogEntry {
    /// Turn this entry belongs to
    pub fn turn(&self) -> u32 {
        match self {
            LogEntry::Risk { turn, .. } | LogEntry::Event { turn, .. } => *turn,
        }
    }

    /// Entry kind tag ("risk" or "event")
    pub fn kind(&self) -> &'static str {
        match self {
            LogEntry::Risk { .. } => "risk",
            LogEntry::Event { .. } => "event",
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Risk {
                turn,
                instrument_name,
                shock_pct,
                ..
            } => write!(
                f,
                "[turn {}] {} took a {:.1}% shock",
                turn, instrument_name, shock_pct
            ),
            LogEntry::Event {
                turn,
                title,
                balance_change,
                ..
            } => write!(f, "[turn {}] {} ({:+})", turn, title, balance_change),
        }
    }
}

/// Per-instrument outcome of one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentDetail {
    /// Instrument display name
    pub name: String,

    /// Profit on the invested amount, floored
    pub profit: i64,

    /// Realized return in percent, one decimal
    pub return_rate: f64,
}

/// Everything a turn produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Balance after returns and any event, floored
    pub new_balance: i64,

    /// `new_balance - balance`, event included
    pub last_diff: i64,

    /// Balance change from returns alone
    pub pre_event_diff: i64,

    /// Narrative entries in the order they happened
    pub turn_log: Vec<LogEntry>,

    /// Event applied this turn, if any
    pub random_event: Option<MarketEvent>,

    /// Instrument state after drift and event effects
    pub new_instruments: InstrumentBook,

    /// Profit and return per instrument id
    pub instrument_details: BTreeMap<String, InstrumentDetail>,
}

impl TurnResult {
    /// Whether an event fired this turn
    pub fn event_fired(&self) -> bool {
        self.random_event.is_some()
    }

    /// Log entries of one kind
    pub fn log_of_kind(&self, kind: &str) -> Vec<&LogEntry> {
        self.turn_log.iter().filter(|e| e.kind() == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_kind_and_display() {
        let entry = LogEntry::Risk {
            turn: 4,
            instrument_id: "asia".to_string(),
            instrument_name: "Asia".to_string(),
            shock_pct: 12.5,
        };
        assert_eq!(entry.kind(), "risk");
        assert_eq!(entry.turn(), 4);
        assert_eq!(entry.to_string(), "[turn 4] Asia took a 12.5% shock");

        let event = LogEntry::Event {
            turn: 2,
            event_id: "it_bubble_burst".to_string(),
            title: "IT Bubble Bursts".to_string(),
            balance_change: -234_000,
        };
        assert_eq!(event.kind(), "event");
        assert_eq!(event.to_string(), "[turn 2] IT Bubble Bursts (-234000)");
    }

    #[test]
    fn test_log_entry_serde_kind_tag() {
        let entry = LogEntry::Event {
            turn: 1,
            event_id: "index_rally".to_string(),
            title: "Index Rally".to_string(),
            balance_change: 100,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "event");
        assert_eq!(json["turn"], 1);
    }
}
