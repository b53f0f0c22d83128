//! Shared domain types for one routing request.
//!
//! Nothing here is persisted: every type lives for the duration of a
//! single request and is discarded once the response is assembled.

mod arrival;
mod leg;

pub use arrival::Arrival;
pub use leg::{Leg, SubwayStop, TrafficMode};

use serde::Serialize;

/// A (longitude, latitude) pair, as returned by the place-search API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
}

/// Summary metrics of the chosen itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteSummary {
    pub total_time_min: u32,
    pub payment_won: u32,
    pub bus_transit_count: u32,
    pub subway_transit_count: u32,
    pub total_walk_m: u32,
    pub total_distance_m: u32,
    pub first_start_station: String,
    pub last_end_station: String,
}

/// One subway boarding or transfer point of an itinerary, derived from
/// the leg list. Drives the realtime arrival lookup for that station.
#[derive(Debug, Clone, PartialEq)]
pub struct SubwayRouteInfo {
    /// Station the rider boards at.
    pub station: String,

    /// Normalized line name of the leg departing this station.
    pub line: String,

    /// End station of that leg.
    pub destination: String,

    /// Ordered station names along the leg (may be empty when the
    /// provider omits the station list).
    pub stations: Vec<String>,

    /// True for every subway entry after the first one, i.e. the rider
    /// is changing trains here rather than starting the journey.
    pub is_transfer: bool,
}
