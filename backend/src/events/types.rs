//! Market event types
//!
//! A market event is data: an id, some descriptive text, and a
//! declarative effect saying which instrument parameters move and how
//! much of the invested money is gained or lost.
//!
//! # Design Principles
//!
//! 1. **Declarative**: effects are parameter deltas, not closures
//! 2. **Isolated**: applying an effect never touches the caller's state
//! 3. **Serializable**: catalogs can be stored or shipped as JSON

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rng::RandomSource;

/// Probability that a gated policy fires in a turn
pub const DEFAULT_EVENT_PROBABILITY: f64 = 0.3;

/// Parameter changes an event applies to one instrument
///
/// Fields that do not apply to an instrument's profile are ignored
/// (e.g. `interest` on a fund).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDelta {
    /// Added to a fund's expected return (percent points)
    pub expected_return: f64,

    /// Added to a region's interest (percent points)
    pub interest: f64,

    /// Added to a region's growth (percent points)
    pub growth: f64,

    /// Added to a region's risk
    pub risk: f64,

    /// Percent of the amount invested in the instrument gained (positive)
    /// or lost (negative) immediately
    pub invested_pct: f64,
}

impl ParameterDelta {
    pub fn expected_return(mut self, value: f64) -> Self {
        self.expected_return = value;
        self
    }

    pub fn interest(mut self, value: f64) -> Self {
        self.interest = value;
        self
    }

    pub fn growth(mut self, value: f64) -> Self {
        self.growth = value;
        self
    }

    pub fn risk(mut self, value: f64) -> Self {
        self.risk = value;
        self
    }

    pub fn invested_pct(mut self, value: f64) -> Self {
        self.invested_pct = value;
        self
    }
}

/// What an event does when it fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventEffect {
    /// Deltas for specific instruments, keyed by id
    Targeted {
        targets: BTreeMap<String, ParameterDelta>,
    },

    /// The same delta for every instrument in the market
    Broad { delta: ParameterDelta },
}

impl EventEffect {
    /// Effect on a single instrument
    pub fn single(id: impl Into<String>, delta: ParameterDelta) -> Self {
        let mut targets = BTreeMap::new();
        targets.insert(id.into(), delta);
        EventEffect::Targeted { targets }
    }
}

/// A catalog entry: a world event that can hit the market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Stable identifier (e.g. "it_bubble_burst")
    pub id: String,

    /// Headline
    pub title: String,

    /// Longer narrative text
    pub description: String,

    /// Classification tag for presentation ("crash", "boom", ...)
    pub icon: String,

    /// Effect applied when the event fires
    pub effect: EventEffect,
}

impl MarketEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        effect: EventEffect,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            effect,
        }
    }
}

/// When an event fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum EventPolicy {
    /// Fires when a trigger draw lands below `probability`
    Gated { probability: f64 },

    /// Fires every turn, no trigger draw
    Unconditional,
}

impl EventPolicy {
    /// Gated policy with the default 30% probability
    pub fn gated() -> Self {
        EventPolicy::Gated {
            probability: DEFAULT_EVENT_PROBABILITY,
        }
    }

    /// Decide whether an event fires this turn
    ///
    /// Gated policies consume exactly one draw; unconditional ones none.
    pub fn fires<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        match self {
            EventPolicy::Gated { probability } => rng.next_f64() < *probability,
            EventPolicy::Unconditional => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    #[test]
    fn test_gated_policy_threshold() {
        let policy = EventPolicy::gated();

        let mut below = SequenceRng::constant(0.29);
        assert!(policy.fires(&mut below));

        let mut at = SequenceRng::constant(0.3);
        assert!(!policy.fires(&mut at));
        assert_eq!(at.draws(), 1);
    }

    #[test]
    fn test_unconditional_policy_draws_nothing() {
        let mut rng = SequenceRng::constant(0.99);
        assert!(EventPolicy::Unconditional.fires(&mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_delta_serde_defaults() {
        let delta: ParameterDelta = serde_json::from_str(r#"{"risk": 2.0}"#).unwrap();
        assert_eq!(delta, ParameterDelta::default().risk(2.0));
    }

    #[test]
    fn test_policy_serde() {
        let policy: EventPolicy =
            serde_json::from_str(r#"{"policy": "gated", "probability": 0.5}"#).unwrap();
        assert_eq!(policy, EventPolicy::Gated { probability: 0.5 });

        let policy: EventPolicy = serde_json::from_str(r#"{"policy": "unconditional"}"#).unwrap();
        assert_eq!(policy, EventPolicy::Unconditional);
    }
}
