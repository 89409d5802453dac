//! PyO3 wrapper for Orchestrator
//!
//! This module provides the Python interface to a game session.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{allocation_from_py, from_json, to_json};
use crate::orchestrator::{Orchestrator, OrchestratorConfig, SimulationError};

/// Python wrapper for a game session
///
/// # Example (from Python)
///
/// ```python
/// from portfolio_sim_core_rs import Game
///
/// game = Game.new('{"rng_seed": 42, "max_turns": 10}')
/// while not game.is_finished():
///     result = json.loads(game.play_turn({"A": 40, "B": 40, "C": 20}))
///     print(result["new_balance"], result["last_diff"])
/// print(game.play_style())
/// ```
#[pyclass(name = "Game")]
pub struct PyGame {
    inner: Orchestrator,
}

fn to_py_err(error: SimulationError) -> PyErr {
    match error {
        SimulationError::InvalidAllocation(_) | SimulationError::UnknownInstrument(_) => {
            PyValueError::new_err(error.to_string())
        }
        _ => PyRuntimeError::new_err(error.to_string()),
    }
}

#[pymethods]
impl PyGame {
    /// Create a new game from a JSON configuration
    ///
    /// # Errors
    ///
    /// Raises ValueError if the JSON is malformed, RuntimeError if the
    /// configuration is rejected.
    #[staticmethod]
    fn new(config_json: &str) -> PyResult<Self> {
        let config: OrchestratorConfig = from_json(config_json, "config")?;
        let inner = Orchestrator::new(config).map_err(|e| {
            PyRuntimeError::new_err(format!("Failed to create game: {}", e))
        })?;

        Ok(PyGame { inner })
    }

    /// Play one turn
    ///
    /// # Arguments
    ///
    /// * `allocation` - Dict of instrument id to percent
    ///
    /// # Returns
    ///
    /// The turn result as a JSON string
    fn play_turn(&mut self, allocation: &Bound<'_, PyDict>) -> PyResult<String> {
        let allocation = allocation_from_py(allocation)?;
        let result = self.inner.play_turn(allocation).map_err(to_py_err)?;
        to_json(&result)
    }

    /// Current balance
    fn balance(&self) -> i64 {
        self.inner.balance()
    }

    /// Turns played so far
    fn current_turn(&self) -> u32 {
        self.inner.current_turn()
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Play-style label over the turns played so far
    fn play_style(&self) -> String {
        self.inner.play_style().label().to_string()
    }

    /// Current instrument state as a JSON string
    fn instruments(&self) -> PyResult<String> {
        to_json(self.inner.instruments())
    }

    /// History as a JSON string
    fn history(&self) -> PyResult<String> {
        to_json(&self.inner.history())
    }

    /// Ids of unlocked achievements
    fn unlocked_achievements(&self) -> Vec<String> {
        self.inner.unlocked_achievements().iter().cloned().collect()
    }

    /// Ids of earned rewards
    fn unlocked_rewards(&self) -> Vec<String> {
        self.inner.unlocked_rewards().iter().cloned().collect()
    }

    /// Full event log as a JSON string
    fn event_log(&self) -> PyResult<String> {
        to_json(self.inner.event_log().events())
    }
}
