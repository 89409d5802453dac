//! Tests for per-strategy return sampling

use portfolio_sim_core_rs::models::{BoundedParams, Fluctuation, MacroParams};
use portfolio_sim_core_rs::returns::{
    aggressive_fluctuation, balanced_fluctuation, macro_sample, sample_return, stable_fluctuation,
};
use portfolio_sim_core_rs::rng::SequenceRng;
use portfolio_sim_core_rs::ReturnProfile;

fn bounded(expected_return: f64, min: f64, max: f64) -> BoundedParams {
    BoundedParams {
        expected_return,
        fluctuation: Fluctuation { min, max },
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_stable_example_draws() {
    let params = bounded(3.0, 1.0, 5.0);
    let mut rng = SequenceRng::new(vec![0.8, 0.7], 0.0);

    let sample = sample_return(&ReturnProfile::Stable(params), &mut rng);

    assert!(close(sample.rate, 0.072));
    assert_eq!(sample.shock, None);
    assert_eq!(rng.draws(), 2);
}

#[test]
fn test_stable_negative_sign() {
    let params = bounded(3.0, 1.0, 5.0);
    let mut rng = SequenceRng::new(vec![0.0, 0.8], 0.0);

    // magnitude 1.0, sign draw 0.8 is not below 0.8
    assert!(close(stable_fluctuation(&params, &mut rng), -1.0));
}

#[test]
fn test_balanced_is_symmetric_around_zero() {
    let params = bounded(6.0, 0.0, 15.0);

    assert!(close(balanced_fluctuation(&params, &mut SequenceRng::constant(0.0)), -15.0));
    assert!(close(balanced_fluctuation(&params, &mut SequenceRng::constant(0.5)), 0.0));
    assert!(close(balanced_fluctuation(&params, &mut SequenceRng::constant(0.75)), 7.5));
}

#[test]
fn test_balanced_ignores_min() {
    let with_min = bounded(6.0, 10.0, 15.0);
    let without_min = bounded(6.0, 0.0, 15.0);

    for r in [0.0, 0.2, 0.4, 0.9] {
        assert_eq!(
            balanced_fluctuation(&with_min, &mut SequenceRng::constant(r)),
            balanced_fluctuation(&without_min, &mut SequenceRng::constant(r))
        );
    }
}

#[test]
fn test_aggressive_band() {
    let params = bounded(12.0, -30.0, 40.0);

    assert!(close(aggressive_fluctuation(&params, &mut SequenceRng::constant(0.0)), -30.0));

    let sample = sample_return(&ReturnProfile::Aggressive(params), &mut SequenceRng::constant(0.5));
    assert!(close(sample.rate, 0.17));
}

#[test]
fn test_macro_without_shock() {
    let asia = MacroParams::new(3.0, 5.0, 4.0);
    let mut rng = SequenceRng::new(vec![0.6], 0.0);

    let sample = macro_sample(&asia, &mut rng);

    assert!(close(sample.rate, 0.07));
    assert_eq!(sample.shock, None);
    assert_eq!(rng.draws(), 1);
}

#[test]
fn test_macro_with_shock() {
    let asia = MacroParams::new(3.0, 5.0, 4.0);
    let mut rng = SequenceRng::new(vec![0.4, 0.5], 0.0);

    let sample = macro_sample(&asia, &mut rng);

    assert!(close(sample.shock.unwrap(), 0.125));
    assert!(close(sample.rate, -0.055));
    assert_eq!(rng.draws(), 2);
}

#[test]
fn test_macro_zero_risk_never_shocks() {
    let calm = MacroParams::new(1.0, 0.0, 1.0);

    let sample = macro_sample(&calm, &mut SequenceRng::constant(0.0));
    assert_eq!(sample.shock, None);
}
