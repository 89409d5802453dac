//! Deterministic random number generation
//!
//! Every stochastic step of a turn (return fluctuations, risk shocks,
//! parameter drift, event triggers and selection) draws from a
//! [`RandomSource`] passed in by the caller. There is no ambient RNG.
//!
//! - [`RngManager`]: seeded xorshift64* generator used by the game session
//! - [`SequenceRng`]: scripted draws for replaying an exact sequence

mod sequence;
mod xorshift;

pub use sequence::SequenceRng;
pub use xorshift::RngManager;

/// A source of uniform draws in `[0.0, 1.0)`.
///
/// The order in which the core calls `next_f64` is part of its contract:
/// the same sequence of draws always yields the same turn result.
pub trait RandomSource {
    /// Next uniform value in `[0.0, 1.0)`
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)` using exactly one draw
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }
}
