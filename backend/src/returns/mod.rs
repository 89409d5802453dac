//! Return model
//!
//! Maps one instrument's parameters plus a random source to the rate of
//! return for a single turn. Pure functions; the only state touched is
//! the random source.
//!
//! # Draw order
//!
//! | strategy   | draws                                   |
//! |------------|-----------------------------------------|
//! | stable     | magnitude, then sign                    |
//! | balanced   | one                                     |
//! | aggressive | one                                     |
//! | macro      | risk roll, then shock size if it hits   |
//!
//! Callers rely on this order to replay a turn from a recorded sequence.

use crate::models::instrument::{BoundedParams, MacroParams, ReturnProfile};
use crate::rng::RandomSource;

/// Chance that a stable instrument's fluctuation is positive
pub const STABLE_UP_PROBABILITY: f64 = 0.8;

/// Upper bound of the macro risk roll
pub const RISK_ROLL_SCALE: f64 = 10.0;

/// Smallest shock subtracted from a macro rate when the risk roll hits
pub const SHOCK_MIN: f64 = 0.05;

/// Largest shock subtracted from a macro rate when the risk roll hits
pub const SHOCK_MAX: f64 = 0.20;

/// Outcome of sampling one instrument for one turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnSample {
    /// Rate of return as a fraction (0.072 = 7.2%)
    pub rate: f64,

    /// Shock subtracted from a macro rate, as a fraction
    pub shock: Option<f64>,
}

/// Stable strategy: magnitude in `[min, max)`, positive 80% of the time
///
/// # Example
/// ```
/// use portfolio_sim_core_rs::models::{BoundedParams, Fluctuation};
/// use portfolio_sim_core_rs::returns::stable_fluctuation;
/// use portfolio_sim_core_rs::rng::SequenceRng;
///
/// let params = BoundedParams {
///     expected_return: 3.0,
///     fluctuation: Fluctuation { min: 1.0, max: 5.0 },
/// };
/// // magnitude draw 0.8 → 4.2, sign draw 0.7 < 0.8 → positive
/// let mut rng = SequenceRng::new(vec![0.8, 0.7], 0.0);
/// let fluctuation = stable_fluctuation(&params, &mut rng);
/// assert!((fluctuation - 4.2).abs() < 1e-9);
/// ```
pub fn stable_fluctuation<R: RandomSource + ?Sized>(params: &BoundedParams, rng: &mut R) -> f64 {
    let band = params.fluctuation;
    let magnitude = rng.uniform(band.min, band.max);
    if rng.next_f64() < STABLE_UP_PROBABILITY {
        magnitude
    } else {
        -magnitude
    }
}

/// Balanced strategy: uniform on `[-max, max)`
///
/// `fluctuation.min` plays no part here.
pub fn balanced_fluctuation<R: RandomSource + ?Sized>(params: &BoundedParams, rng: &mut R) -> f64 {
    let max = params.fluctuation.max;
    rng.next_f64() * max * 2.0 - max
}

/// Aggressive strategy: uniform on `[min, max)`
pub fn aggressive_fluctuation<R: RandomSource + ?Sized>(params: &BoundedParams, rng: &mut R) -> f64 {
    rng.uniform(params.fluctuation.min, params.fluctuation.max)
}

/// Macro strategy: `(interest + growth) / 100`, minus a shock when the
/// risk roll lands below the region's risk
pub fn macro_sample<R: RandomSource + ?Sized>(params: &MacroParams, rng: &mut R) -> ReturnSample {
    let base = (params.interest + params.growth) / 100.0;
    let roll = rng.next_f64() * RISK_ROLL_SCALE;

    if roll < params.risk {
        let shock = rng.uniform(SHOCK_MIN, SHOCK_MAX);
        ReturnSample {
            rate: base - shock,
            shock: Some(shock),
        }
    } else {
        ReturnSample {
            rate: base,
            shock: None,
        }
    }
}

/// Sample the turn's rate of return for any profile
pub fn sample_return<R: RandomSource + ?Sized>(profile: &ReturnProfile, rng: &mut R) -> ReturnSample {
    let bounded = |params: &BoundedParams, fluctuation: f64| ReturnSample {
        rate: (params.expected_return + fluctuation) / 100.0,
        shock: None,
    };

    match profile {
        ReturnProfile::Stable(params) => bounded(params, stable_fluctuation(params, rng)),
        ReturnProfile::Balanced(params) => bounded(params, balanced_fluctuation(params, rng)),
        ReturnProfile::Aggressive(params) => bounded(params, aggressive_fluctuation(params, rng)),
        ReturnProfile::Macro(params) => macro_sample(params, rng),
    }
}

/// Round to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::instrument::Fluctuation;
    use crate::rng::SequenceRng;

    fn params(expected_return: f64, min: f64, max: f64) -> BoundedParams {
        BoundedParams {
            expected_return,
            fluctuation: Fluctuation { min, max },
        }
    }

    #[test]
    fn test_stable_sign_threshold() {
        let p = params(3.0, 1.0, 5.0);

        let mut up = SequenceRng::new(vec![0.5, 0.79], 0.0);
        assert_eq!(stable_fluctuation(&p, &mut up), 3.0);

        let mut down = SequenceRng::new(vec![0.5, 0.8], 0.0);
        assert_eq!(stable_fluctuation(&p, &mut down), -3.0);
        assert_eq!(down.draws(), 2);
    }

    #[test]
    fn test_balanced_ignores_min() {
        let with_min = params(6.0, 10.0, 15.0);
        let without_min = params(6.0, 0.0, 15.0);

        let a = balanced_fluctuation(&with_min, &mut SequenceRng::constant(0.1));
        let b = balanced_fluctuation(&without_min, &mut SequenceRng::constant(0.1));
        assert_eq!(a, b);
        assert!((a - -12.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggressive_uses_band_directly() {
        let p = params(12.0, -30.0, 40.0);
        let value = aggressive_fluctuation(&p, &mut SequenceRng::constant(0.0));
        assert_eq!(value, -30.0);
    }

    #[test]
    fn test_macro_no_shock_consumes_one_draw() {
        let p = MacroParams::new(2.0, 3.0, 2.5);
        let mut rng = SequenceRng::new(vec![0.5], 0.0); // roll 5.0 >= risk 3.0
        let sample = macro_sample(&p, &mut rng);

        assert!((sample.rate - 0.045).abs() < 1e-12);
        assert_eq!(sample.shock, None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_macro_shock_range() {
        let p = MacroParams::new(2.0, 3.0, 2.5);
        let mut rng = SequenceRng::new(vec![0.1, 0.5], 0.0); // roll 1.0 < 3.0
        let sample = macro_sample(&p, &mut rng);

        let shock = sample.shock.unwrap();
        assert!((shock - 0.125).abs() < 1e-12);
        assert!((sample.rate - (0.045 - 0.125)).abs() < 1e-12);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(7.249), 7.2);
        assert_eq!(round_one_decimal(-12.46), -12.5);
    }
}
