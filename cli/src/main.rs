//! Scripted game runner
//!
//! Usage: `portfolio-sim-cli <scenario.json>`
//!
//! The scenario is a game configuration plus the allocation for every
//! turn:
//!
//! ```json
//! {
//!   "rng_seed": 42,
//!   "market": "funds",
//!   "max_turns": 3,
//!   "turns": [{"A": 50, "B": 50}, {"C": 100}, {"A": 100}]
//! }
//! ```
//!
//! Prints one JSON line per turn result, then one summary line.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use portfolio_sim_core_rs::{Allocation, Orchestrator, OrchestratorConfig, PlayStyle, SimulationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: portfolio-sim-cli <scenario.json>")]
    Usage,

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("turn {turn}: {source}")]
    Turn {
        turn: usize,
        source: SimulationError,
    },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(flatten)]
    config: OrchestratorConfig,

    #[serde(default)]
    turns: Vec<Allocation>,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    turns_played: u32,
    final_balance: i64,
    unlocked_achievements: &'a BTreeSet<String>,
    unlocked_rewards: &'a BTreeSet<String>,
    play_style: PlayStyle,
    play_style_label: &'static str,
}

fn run(path: PathBuf) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let scenario: Scenario = serde_json::from_str(&text)?;

    let mut game = Orchestrator::new(scenario.config)?;

    for (index, allocation) in scenario.turns.into_iter().enumerate() {
        let result = game.play_turn(allocation).map_err(|source| CliError::Turn {
            turn: index + 1,
            source,
        })?;
        println!("{}", serde_json::to_string(&result)?);
    }

    let style = game.play_style();
    let summary = Summary {
        turns_played: game.current_turn(),
        final_balance: game.balance(),
        unlocked_achievements: game.unlocked_achievements(),
        unlocked_rewards: game.unlocked_rewards(),
        play_style: style,
        play_style_label: style.label(),
    };
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}

fn main() -> ExitCode {
    let mut args = std::env::args_os().skip(1);
    let result = match (args.next(), args.next()) {
        (Some(path), None) => run(PathBuf::from(path)),
        _ => Err(CliError::Usage),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
