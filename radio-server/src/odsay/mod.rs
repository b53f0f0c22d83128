//! Multi-modal transit routing provider.
//!
//! Wraps the ODsay public-transport path search: given two coordinates
//! and a routing preference it returns the provider's first-ranked
//! itinerary, decomposed into summary metrics and an ordered leg list.
//! The provider's ranking is trusted as-is; no local re-ranking.

mod client;
pub mod convert;
mod error;
pub mod types;

pub use client::OdsayClient;
pub use error::OdsayError;

use crate::domain::{Leg, RouteSummary};

/// Routing preference, passed through to the provider opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutePreference {
    #[default]
    Recommended,
    Fastest,
    FewestTransfers,
}

impl RoutePreference {
    /// Parse the wire value (0 recommended, 1 fastest, 2 fewest transfers).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RoutePreference::Recommended),
            1 => Some(RoutePreference::Fastest),
            2 => Some(RoutePreference::FewestTransfers),
            _ => None,
        }
    }

    /// The provider's `OPT` query value.
    pub fn code(self) -> u8 {
        match self {
            RoutePreference::Recommended => 0,
            RoutePreference::Fastest => 1,
            RoutePreference::FewestTransfers => 2,
        }
    }
}

/// The chosen itinerary, ready for realtime enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub summary: RouteSummary,
    pub legs: Vec<Leg>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_round_trips() {
        for code in 0..=2 {
            assert_eq!(RoutePreference::from_code(code).unwrap().code(), code);
        }
        assert!(RoutePreference::from_code(3).is_none());
    }
}
