//! Event catalogs
//!
//! A catalog is a fixed, ordered, non-empty list of market events. When
//! the trigger policy fires, one event is picked with a single draw:
//! `index = floor(r * len)`.

use thiserror::Error;

use crate::events::types::{EventEffect, MarketEvent, ParameterDelta};
use crate::rng::RandomSource;

/// Errors raised when building a catalog
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Event catalog must contain at least one event")]
    Empty,

    #[error("Duplicate event ID: {0}")]
    DuplicateId(String),
}

/// Ordered, non-empty list of market events
#[derive(Debug, Clone, PartialEq)]
pub struct EventCatalog {
    events: Vec<MarketEvent>,
}

impl EventCatalog {
    /// Build a catalog
    ///
    /// # Errors
    /// * [`CatalogError::Empty`] if `events` is empty
    /// * [`CatalogError::DuplicateId`] if two events share an id
    pub fn new(events: Vec<MarketEvent>) -> Result<Self, CatalogError> {
        if events.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = std::collections::HashSet::new();
        for event in &events {
            if !ids.insert(event.id.as_str()) {
                return Err(CatalogError::DuplicateId(event.id.clone()));
            }
        }

        Ok(Self { events })
    }

    /// Catalog used by the fund market
    pub fn funds() -> Self {
        Self {
            events: fund_events(),
        }
    }

    /// Catalog used by the region market
    pub fn regions() -> Self {
        Self {
            events: region_events(),
        }
    }

    /// All events in catalog order
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up an event by id
    pub fn get(&self, id: &str) -> Option<&MarketEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Pick one event uniformly, consuming exactly one draw
    pub fn select<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &MarketEvent {
        let index = (rng.next_f64() * self.events.len() as f64).floor() as usize;
        &self.events[index.min(self.events.len() - 1)]
    }
}

/// Events that can hit the fund market, in selection order
pub fn fund_events() -> Vec<MarketEvent> {
    vec![
        MarketEvent::new(
            "monetary_easing",
            "Monetary Easing",
            "The central bank cuts rates. Every fund's outlook improves.",
            "boom",
            EventEffect::Broad {
                delta: ParameterDelta::default().expected_return(1.0),
            },
        ),
        MarketEvent::new(
            "it_bubble_burst",
            "IT Bubble Bursts",
            "Tech valuations collapse overnight. Speculative money takes a 20% hit.",
            "crash",
            EventEffect::single(
                "C",
                ParameterDelta::default()
                    .invested_pct(-20.0)
                    .expected_return(-2.0),
            ),
        ),
        MarketEvent::new(
            "flight_to_safety",
            "Flight to Safety",
            "Nervous investors pile into safe assets, lifting the stable fund.",
            "shield",
            EventEffect::single("A", ParameterDelta::default().invested_pct(5.0)),
        ),
        MarketEvent::new(
            "index_rally",
            "Index Rally",
            "A broad rally lifts the whole index.",
            "chart",
            EventEffect::single("B", ParameterDelta::default().invested_pct(8.0)),
        ),
    ]
}

/// Events that can hit the region market, in selection order
pub fn region_events() -> Vec<MarketEvent> {
    vec![
        MarketEvent::new(
            "rate_hike",
            "North American Rate Hike",
            "Rates go up to cool an overheating economy.",
            "bank",
            EventEffect::single(
                "north_america",
                ParameterDelta::default().interest(0.5).growth(-0.3).risk(1.0),
            ),
        ),
        MarketEvent::new(
            "debt_crisis",
            "European Debt Crisis",
            "Sovereign spreads blow out across the continent.",
            "crash",
            EventEffect::single(
                "europe",
                ParameterDelta::default()
                    .risk(3.0)
                    .growth(-1.0)
                    .invested_pct(-10.0),
            ),
        ),
        MarketEvent::new(
            "tech_boom",
            "Asian Tech Boom",
            "Chip demand surges and Asian exporters rally.",
            "boom",
            EventEffect::single(
                "asia",
                ParameterDelta::default()
                    .growth(1.5)
                    .risk(0.5)
                    .invested_pct(6.0),
            ),
        ),
        MarketEvent::new(
            "capital_flight",
            "Capital Flight",
            "Money rushes out of emerging markets; rates jump to stem the outflow.",
            "crash",
            EventEffect::single(
                "emerging",
                ParameterDelta::default()
                    .risk(2.5)
                    .interest(1.0)
                    .invested_pct(-12.0),
            ),
        ),
        MarketEvent::new(
            "global_calm",
            "Global Calm",
            "A quiet quarter everywhere. Risk premiums shrink.",
            "dove",
            EventEffect::Broad {
                delta: ParameterDelta::default().risk(-1.0),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(EventCatalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut events = fund_events();
        events.push(events[0].clone());
        assert_eq!(
            EventCatalog::new(events),
            Err(CatalogError::DuplicateId("monetary_easing".to_string()))
        );
    }

    #[test]
    fn test_select_floor_index() {
        let catalog = EventCatalog::funds();
        assert_eq!(catalog.len(), 4);

        let picks: Vec<&str> = [0.0, 0.25, 0.5, 0.75, 0.999]
            .iter()
            .map(|&r| catalog.select(&mut SequenceRng::constant(r)).id.as_str())
            .collect();

        assert_eq!(
            picks,
            vec![
                "monetary_easing",
                "it_bubble_burst",
                "flight_to_safety",
                "index_rally",
                "index_rally"
            ]
        );
    }

    #[test]
    fn test_builtin_catalogs_are_valid() {
        assert!(EventCatalog::new(fund_events()).is_ok());
        assert!(EventCatalog::new(region_events()).is_ok());
        assert!(EventCatalog::regions().get("global_calm").is_some());
    }
}
