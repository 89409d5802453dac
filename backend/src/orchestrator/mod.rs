//! Orchestrator - one game session
//!
//! Wraps the turn resolver with balance, history, turn counting,
//! achievement polling and the event log.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

pub use engine::{
    MarketKind, Orchestrator, OrchestratorConfig, SimulationError, DEFAULT_INITIAL_BALANCE,
};
