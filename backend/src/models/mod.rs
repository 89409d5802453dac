//! Domain models for the portfolio simulator

pub mod allocation;
pub mod event;
pub mod history;
pub mod instrument;
pub mod turn;

// Re-exports
pub use allocation::Allocation;
pub use event::{Event, EventLog};
pub use history::HistoryEntry;
pub use instrument::{
    BoundedParams, Fluctuation, Instrument, InstrumentBook, MacroParams, ReturnProfile, Strategy,
};
pub use turn::{InstrumentDetail, LogEntry, TurnResult};
