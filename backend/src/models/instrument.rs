//! Instrument model
//!
//! An instrument is an investable option: a fund with a bounded
//! fluctuation band, or a region driven by macro parameters.
//!
//! Identity (`id`, `name`, `description`, `color`) never changes during a
//! game. The return parameters inside [`ReturnProfile`] do: events shift
//! them and regions drift every turn.
//!
//! # Critical Invariants
//!
//! 1. `fluctuation.min <= fluctuation.max`
//! 2. Macro `risk` stays within `[0, 10]`
//! 3. Macro `interest` never drops below `-1`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest value macro `risk` may take
pub const RISK_MIN: f64 = 0.0;

/// Highest value macro `risk` may take
pub const RISK_MAX: f64 = 10.0;

/// Floor for macro `interest`
pub const INTEREST_FLOOR: f64 = -1.0;

/// All instruments of a game, keyed by id
///
/// Ordered keys give a stable iteration order, which in turn fixes the
/// order of random draws within a turn. `clone()` is a full deep copy.
pub type InstrumentBook = BTreeMap<String, Instrument>;

/// Percent bounds around an instrument's expected return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fluctuation {
    pub min: f64,
    pub max: f64,
}

/// Parameters shared by the stable, balanced and aggressive strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedParams {
    /// Base return per turn (percent)
    pub expected_return: f64,

    /// Fluctuation band (percent)
    pub fluctuation: Fluctuation,
}

/// Parameters of a region instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroParams {
    /// Interest rate (percent)
    pub interest: f64,

    /// Shock likelihood on a 0-10 scale
    pub risk: f64,

    /// Growth rate (percent)
    pub growth: f64,

    /// Value `risk` drifts back toward each turn
    ///
    /// `None` in hand-written configs; the game session fills it in from
    /// the initial `risk` before the first turn.
    #[serde(default)]
    pub baseline_risk: Option<f64>,
}

impl MacroParams {
    /// Create region parameters, using the initial risk as baseline
    pub fn new(interest: f64, risk: f64, growth: f64) -> Self {
        Self {
            interest,
            risk,
            growth,
            baseline_risk: Some(risk),
        }
    }

    /// Risk level the region relaxes toward
    pub fn baseline(&self) -> f64 {
        self.baseline_risk.unwrap_or(self.risk)
    }

    /// Clamp risk into `[0, 10]` and floor interest at `-1`
    pub fn clamp(&mut self) {
        self.risk = self.risk.clamp(RISK_MIN, RISK_MAX);
        self.interest = self.interest.max(INTEREST_FLOOR);
    }
}

/// Return-shape strategy tag, without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Stable,
    Balanced,
    Aggressive,
    Macro,
}

/// How an instrument turns invested money into a return
///
/// The variant selects the return strategy; nothing in the return model
/// looks at instrument ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ReturnProfile {
    /// Usually positive: magnitude in `[min, max)`, positive 80% of the time
    Stable(BoundedParams),

    /// Symmetric: uniform on `[-max, max)`; `min` is not used
    Balanced(BoundedParams),

    /// Uniform on `[min, max)`, no sign handling
    Aggressive(BoundedParams),

    /// Interest + growth, minus a random shock when the risk roll hits
    Macro(MacroParams),
}

impl ReturnProfile {
    /// Strategy tag of this profile
    pub fn strategy(&self) -> Strategy {
        match self {
            ReturnProfile::Stable(_) => Strategy::Stable,
            ReturnProfile::Balanced(_) => Strategy::Balanced,
            ReturnProfile::Aggressive(_) => Strategy::Aggressive,
            ReturnProfile::Macro(_) => Strategy::Macro,
        }
    }

    /// Bounded parameters, if this is a fund-style profile
    pub fn bounded(&self) -> Option<&BoundedParams> {
        match self {
            ReturnProfile::Stable(p) | ReturnProfile::Balanced(p) | ReturnProfile::Aggressive(p) => {
                Some(p)
            }
            ReturnProfile::Macro(_) => None,
        }
    }

    /// Mutable bounded parameters
    pub fn bounded_mut(&mut self) -> Option<&mut BoundedParams> {
        match self {
            ReturnProfile::Stable(p) | ReturnProfile::Balanced(p) | ReturnProfile::Aggressive(p) => {
                Some(p)
            }
            ReturnProfile::Macro(_) => None,
        }
    }

    /// Macro parameters, if this is a region profile
    pub fn macro_params(&self) -> Option<&MacroParams> {
        match self {
            ReturnProfile::Macro(p) => Some(p),
            _ => None,
        }
    }

    /// Mutable macro parameters
    pub fn macro_params_mut(&mut self) -> Option<&mut MacroParams> {
        match self {
            ReturnProfile::Macro(p) => Some(p),
            _ => None,
        }
    }
}

/// An investable option (fund or region)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Short unique key (e.g. "A", "asia")
    pub id: String,

    /// Display name
    pub name: String,

    /// Player-facing description
    pub description: String,

    /// Presentation color hint
    pub color: String,

    /// Return parameters
    pub profile: ReturnProfile,
}

impl Instrument {
    /// Create an instrument
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
        profile: ReturnProfile,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            color: color.into(),
            profile,
        }
    }

    /// Strategy tag of this instrument
    pub fn strategy(&self) -> Strategy {
        self.profile.strategy()
    }
}

/// Collect instruments into a book keyed by id
///
/// Later duplicates replace earlier ones; callers that care validate
/// uniqueness first.
pub fn book_from(instruments: impl IntoIterator<Item = Instrument>) -> InstrumentBook {
    instruments
        .into_iter()
        .map(|instrument| (instrument.id.clone(), instrument))
        .collect()
}

/// The three starting funds
///
/// # Example
/// ```
/// use portfolio_sim_core_rs::models::instrument::{fund_instruments, Strategy};
///
/// let funds = fund_instruments();
/// assert_eq!(funds.len(), 3);
/// assert_eq!(funds["A"].strategy(), Strategy::Stable);
/// assert_eq!(funds["C"].strategy(), Strategy::Aggressive);
/// ```
pub fn fund_instruments() -> InstrumentBook {
    book_from([
        Instrument::new(
            "A",
            "Stable Fund",
            "Wins most turns, but only by a little.",
            "blue",
            ReturnProfile::Stable(BoundedParams {
                expected_return: 3.0,
                fluctuation: Fluctuation { min: 1.0, max: 5.0 },
            }),
        ),
        Instrument::new(
            "B",
            "Balanced Fund",
            "A balance between stability and growth.",
            "indigo",
            ReturnProfile::Balanced(BoundedParams {
                expected_return: 6.0,
                fluctuation: Fluctuation { min: 0.0, max: 15.0 },
            }),
        ),
        Instrument::new(
            "C",
            "Gamble Fund",
            "Huge when it hits, brutal when it doesn't.",
            "amber",
            ReturnProfile::Aggressive(BoundedParams {
                expected_return: 12.0,
                fluctuation: Fluctuation {
                    min: -30.0,
                    max: 40.0,
                },
            }),
        ),
    ])
}

/// The four starting regions
pub fn region_instruments() -> InstrumentBook {
    book_from([
        Instrument::new(
            "north_america",
            "North America",
            "Deep markets with moderate rates and steady growth.",
            "sky",
            ReturnProfile::Macro(MacroParams::new(2.0, 3.0, 2.5)),
        ),
        Instrument::new(
            "europe",
            "Europe",
            "Low rates, slow growth, occasional debt scares.",
            "emerald",
            ReturnProfile::Macro(MacroParams::new(1.5, 4.0, 1.5)),
        ),
        Instrument::new(
            "asia",
            "Asia",
            "Fast growth with a matching appetite for volatility.",
            "rose",
            ReturnProfile::Macro(MacroParams::new(3.0, 5.0, 4.0)),
        ),
        Instrument::new(
            "emerging",
            "Emerging Markets",
            "High yields for those who can stomach the shocks.",
            "orange",
            ReturnProfile::Macro(MacroParams::new(5.0, 7.0, 5.0)),
        ),
    ])
}
