//! Routing provider response DTOs.
//!
//! These map directly to the ODsay path-search JSON. `Option` is used
//! liberally because the provider omits fields per traffic mode (walk
//! legs carry no lane, bus legs no station list, and so on). Numeric
//! amounts are accepted as floats since the provider is inconsistent
//! about integer formatting.

use serde::Deserialize;

/// Top-level response from `searchPubTransPathT`.
#[derive(Debug, Deserialize)]
pub struct SearchPathResponse {
    pub result: Option<SearchPathResult>,
}

/// Ranked path list. The first entry is the provider's best itinerary.
#[derive(Debug, Deserialize)]
pub struct SearchPathResult {
    #[serde(default)]
    pub path: Vec<PathEntry>,
}

/// One candidate itinerary.
#[derive(Debug, Deserialize)]
pub struct PathEntry {
    pub info: PathInfo,
    #[serde(rename = "subPath", default)]
    pub sub_path: Vec<SubPath>,
}

/// Itinerary-level summary numbers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathInfo {
    pub total_time: Option<f64>,
    pub payment: Option<f64>,
    pub bus_transit_count: Option<f64>,
    pub subway_transit_count: Option<f64>,
    pub total_walk: Option<f64>,
    pub total_distance: Option<f64>,
    pub first_start_station: Option<String>,
    pub last_end_station: Option<String>,
}

/// One raw sub-path (leg) of an itinerary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPath {
    /// 1 subway, 2 bus, 3 walk.
    pub traffic_type: u32,
    pub section_time: Option<f64>,
    pub distance: Option<f64>,
    pub start_name: Option<String>,
    pub end_name: Option<String>,
    pub station_count: Option<u32>,
    pub lane: Option<Lane>,
    /// Numeric subway line code, present on some subway legs that lack
    /// a lane name.
    pub subway_code: Option<u32>,
    pub pass_stop_list: Option<PassStopList>,
}

/// The provider sends `lane` as either a single object or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Lane {
    One(LaneInfo),
    Many(Vec<LaneInfo>),
}

impl Lane {
    /// The line name of the (first) lane, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Lane::One(lane) => lane.name.as_deref(),
            Lane::Many(lanes) => lanes.first().and_then(|l| l.name.as_deref()),
        }
    }
}

/// Lane metadata; only the name is consumed.
#[derive(Debug, Deserialize)]
pub struct LaneInfo {
    pub name: Option<String>,
}

/// Ordered station list of a subway leg.
#[derive(Debug, Deserialize)]
pub struct PassStopList {
    #[serde(default)]
    pub stations: Vec<StationEntry>,
}

/// One station along a leg.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationEntry {
    pub index: Option<u32>,
    pub station_name: Option<String>,
    #[serde(rename = "stationID")]
    pub station_id: Option<i64>,
    pub x: Option<String>,
    pub y: Option<String>,
}
