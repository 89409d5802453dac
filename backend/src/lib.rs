//! Portfolio Simulator Core - Rust Engine
//!
//! Turn-based stochastic portfolio game with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Turn counting
//! - **models**: Domain types (Instrument, Allocation, HistoryEntry, TurnResult)
//! - **returns**: Per-strategy return sampling
//! - **events**: Event catalogs, trigger policies, effect application
//! - **resolver**: One turn, start to finish
//! - **achievements**: Achievement and unlockable predicates
//! - **style**: Play-style classification over a history
//! - **orchestrator**: Game session
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All balances are i64, floored after every money calculation
//! 2. All randomness flows through a `RandomSource` (seeded in play)
//! 3. Resolving a turn never mutates its inputs
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod achievements;
pub mod core;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod resolver;
pub mod returns;
pub mod rng;
pub mod style;

// Re-exports for convenience
pub use achievements::{list_achievements, list_unlockables, Achievement, Unlockable};
pub use core::time::TurnClock;
pub use events::{CatalogError, EventCatalog, EventPolicy, MarketEvent};
pub use models::{
    allocation::Allocation,
    event::{Event, EventLog},
    history::HistoryEntry,
    instrument::{Instrument, InstrumentBook, ReturnProfile, Strategy},
    turn::{InstrumentDetail, LogEntry, TurnResult},
};
pub use orchestrator::{MarketKind, Orchestrator, OrchestratorConfig, SimulationError};
pub use resolver::TurnResolver;
pub use rng::{RandomSource, RngManager, SequenceRng};
pub use style::{classify_style, PlayStyle};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn portfolio_sim_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::game::PyGame>()?;
    Ok(())
}
