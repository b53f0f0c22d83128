//! Arrival disambiguation.
//!
//! The feed returns every train currently approaching a station, on all
//! lines and in both directions. These filters narrow the rows down to
//! trains relevant to the planned leg. Matching is substring-based and
//! inherently fuzzy; the tier ordering (direction → line → unfiltered)
//! is applied by the route assembler.

use crate::domain::{Arrival, SubwayRouteInfo};

use super::lines::{line_name_from_id, strip_station_suffix};

/// Minimum station-name length (in characters) for a substring match,
/// to avoid spurious hits on single-syllable fragments.
const MIN_MATCH_CHARS: usize = 2;

/// True when the arrival's line and the planned line name refer to the
/// same line: either resolved name is a substring of the other, which
/// tolerates partial or prefixed naming on both sides.
pub fn matches_line(arrival: &Arrival, line: &str) -> bool {
    let arrival_line = line_name_from_id(&arrival.subway_id);
    line.contains(arrival_line.as_str()) || arrival_line.contains(line)
}

/// Keep only arrivals on the planned line, regardless of direction.
pub fn filter_by_line(arrivals: &[Arrival], line: &str) -> Vec<Arrival> {
    arrivals
        .iter()
        .filter(|a| matches_line(a, line))
        .cloned()
        .collect()
}

/// Keep only arrivals on the planned line that are heading the planned
/// way. Direction is matched when any of:
///
/// - the train's direction label contains a planned-route station name,
/// - the train's boarding-origin station has a substring relation (either
///   direction) with a planned-route station name,
/// - the direction label contains the leg's destination name.
///
/// All names are compared with the trailing `역` suffix stripped, and
/// only when at least [`MIN_MATCH_CHARS`] characters long.
pub fn filter_by_direction(arrivals: &[Arrival], info: &SubwayRouteInfo) -> Vec<Arrival> {
    let destination = strip_station_suffix(&info.destination);
    let stations: Vec<&str> = info
        .stations
        .iter()
        .map(|s| strip_station_suffix(s))
        .filter(|s| !s.is_empty())
        .collect();

    arrivals
        .iter()
        .filter(|a| matches_line(a, &info.line) && direction_matches(a, &stations, destination))
        .cloned()
        .collect()
}

fn direction_matches(arrival: &Arrival, stations: &[&str], destination: &str) -> bool {
    let label = arrival.train_line.as_str();

    if stations
        .iter()
        .any(|st| st.chars().count() >= MIN_MATCH_CHARS && label.contains(st))
    {
        return true;
    }

    let origin = strip_station_suffix(&arrival.boarding_station);
    if origin.chars().count() >= MIN_MATCH_CHARS
        && stations
            .iter()
            .any(|st| origin.contains(st) || st.contains(origin))
    {
        return true;
    }

    destination.chars().count() >= MIN_MATCH_CHARS && label.contains(destination)
}
