//! Itinerary leg types.

use serde::Serialize;

/// Travel mode of one leg, from the routing provider's traffic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficMode {
    Subway,
    Bus,
    Walk,
}

impl TrafficMode {
    /// Map the provider's numeric traffic type (1 subway, 2 bus, 3 walk).
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => TrafficMode::Subway,
            2 => TrafficMode::Bus,
            _ => TrafficMode::Walk,
        }
    }

    pub fn is_subway(self) -> bool {
        self == TrafficMode::Subway
    }
}

/// One contiguous same-mode segment of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub mode: TrafficMode,
    pub section_time_min: Option<u32>,
    pub distance_m: Option<u32>,
    pub start_name: Option<String>,
    pub end_name: Option<String>,
    pub station_count: Option<u32>,

    /// Normalized line name. Empty for walk legs and for transit legs
    /// where the provider gave no lane information.
    pub line_name: String,

    /// Ordered stations along a subway leg; empty when the provider
    /// furnishes no station list.
    pub stations: Vec<SubwayStop>,
}

/// One station along a subway leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubwayStop {
    pub index: Option<u32>,
    pub name: String,
    pub id: Option<i64>,
    /// Longitude, as the string the provider sends.
    pub x: Option<String>,
    /// Latitude, as the string the provider sends.
    pub y: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traffic_mode_from_provider_codes() {
        assert_eq!(TrafficMode::from_code(1), TrafficMode::Subway);
        assert_eq!(TrafficMode::from_code(2), TrafficMode::Bus);
        assert_eq!(TrafficMode::from_code(3), TrafficMode::Walk);
        // Unknown codes are treated as walking segments.
        assert_eq!(TrafficMode::from_code(7), TrafficMode::Walk);
    }

    #[test]
    fn subway_predicate() {
        assert!(TrafficMode::Subway.is_subway());
        assert!(!TrafficMode::Bus.is_subway());
    }
}
