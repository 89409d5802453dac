//! Scripted random source
//!
//! Replays a fixed list of draws, then keeps returning a fallback value.
//! This pins the exact draw order of a turn, e.g. "magnitude 0.8, sign
//! 0.7, no event".

use super::RandomSource;

/// Random source that returns pre-recorded draws in order
///
/// # Example
/// ```
/// use portfolio_sim_core_rs::rng::{RandomSource, SequenceRng};
///
/// let mut rng = SequenceRng::new(vec![0.8, 0.7], 0.9);
/// assert_eq!(rng.next_f64(), 0.8);
/// assert_eq!(rng.next_f64(), 0.7);
/// assert_eq!(rng.next_f64(), 0.9); // fallback from here on
/// assert_eq!(rng.draws(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f64>,
    fallback: f64,
    cursor: usize,
}

impl SequenceRng {
    /// Replay `values`, then return `fallback` forever
    pub fn new(values: Vec<f64>, fallback: f64) -> Self {
        Self {
            values,
            fallback,
            cursor: 0,
        }
    }

    /// Always return `value`
    pub fn constant(value: f64) -> Self {
        Self::new(Vec::new(), value)
    }

    /// Number of draws consumed so far
    pub fn draws(&self) -> usize {
        self.cursor
    }

    /// Scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.cursor)
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values.get(self.cursor).copied().unwrap_or(self.fallback);
        self.cursor += 1;
        value
    }
}
