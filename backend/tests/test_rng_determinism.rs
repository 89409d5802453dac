//! Tests for deterministic randomness
//!
//! Same seed must give the same draws and therefore the same game.

use portfolio_sim_core_rs::{Allocation, Orchestrator, OrchestratorConfig, RandomSource, RngManager};

#[test]
fn test_rng_same_seed_same_sequence() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..1000 {
        assert_eq!(rng1.next(), rng2.next());
    }
}

#[test]
fn test_rng_different_seeds_diverge() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(54321);

    let same = (0..100).filter(|_| rng1.next() == rng2.next()).count();
    assert!(same < 5);
}

#[test]
fn test_zero_seed_is_usable() {
    let mut rng = RngManager::new(0);
    assert_ne!(rng.get_state(), 0);

    let first = rng.next();
    let second = rng.next();
    assert_ne!(first, second);
}

#[test]
fn test_next_f64_in_unit_interval() {
    let mut rng = RngManager::new(777);

    for _ in 0..10_000 {
        let value = rng.next_f64();
        assert!((0.0..1.0).contains(&value));
    }
}

#[test]
fn test_uniform_respects_bounds() {
    let mut rng = RngManager::new(99);

    for _ in 0..10_000 {
        let value = rng.uniform(-30.0, 40.0);
        assert!((-30.0..40.0).contains(&value));
    }
}

#[test]
fn test_state_resume() {
    let mut rng = RngManager::new(2024);
    for _ in 0..17 {
        rng.next();
    }

    let mut resumed = RngManager::new(rng.get_state());
    for _ in 0..100 {
        assert_eq!(rng.next(), resumed.next());
    }
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut config = OrchestratorConfig::funds(seed);
        config.max_turns = Some(20);
        let mut game = Orchestrator::new(config).unwrap();

        let mut results = Vec::new();
        while !game.is_finished() {
            let allocation = Allocation::from([("A", 20.0), ("B", 30.0), ("C", 50.0)]);
            results.push(game.play_turn(allocation).unwrap());
        }
        (results, game.rng_state())
    };

    let (first, first_state) = play(42);
    let (second, second_state) = play(42);

    assert_eq!(first, second);
    assert_eq!(first_state, second_state);
}

#[test]
fn test_same_seed_same_region_game() {
    let play = |seed: u64| {
        let mut game = Orchestrator::new(OrchestratorConfig::regions(seed)).unwrap();
        for _ in 0..15 {
            let allocation = Allocation::from([("asia", 40.0), ("emerging", 40.0), ("europe", 20.0)]);
            game.play_turn(allocation).unwrap();
        }
        (game.balance(), game.instruments().clone(), game.history().to_vec())
    };

    assert_eq!(play(7), play(7));
}
