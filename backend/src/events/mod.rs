//! Market events
//!
//! - `types`: event data, declarative effects, trigger policies
//! - `catalog`: ordered catalogs and uniform selection
//! - `handler`: effect application on a copy of the market

pub mod catalog;
pub mod handler;
pub mod types;

pub use catalog::{fund_events, region_events, CatalogError, EventCatalog};
pub use handler::EffectOutcome;
pub use types::{EventEffect, EventPolicy, MarketEvent, ParameterDelta, DEFAULT_EVENT_PROBABILITY};
