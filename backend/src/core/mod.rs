//! Core game primitives

pub mod time;

pub use time::TurnClock;
