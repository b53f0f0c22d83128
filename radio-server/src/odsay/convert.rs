//! Conversion from routing provider DTOs to domain types.
//!
//! Handles line-name normalization: prefer the lane name, synthesize one
//! from the subway line code when the lane is absent, and strip the
//! provider's redundant metropolitan-area prefix.

use crate::domain::{Leg, RouteSummary, SubwayStop, TrafficMode};

use super::types::{PathEntry, SubPath};

/// Redundant regional prefix the provider puts on metropolitan lines.
const METRO_AREA_PREFIX: &str = "수도권 ";

/// Extract summary metrics from the chosen itinerary.
pub fn extract_summary(entry: &PathEntry) -> RouteSummary {
    let info = &entry.info;
    RouteSummary {
        total_time_min: info.total_time.unwrap_or(0.0) as u32,
        payment_won: info.payment.unwrap_or(0.0) as u32,
        bus_transit_count: info.bus_transit_count.unwrap_or(0.0) as u32,
        subway_transit_count: info.subway_transit_count.unwrap_or(0.0) as u32,
        total_walk_m: info.total_walk.unwrap_or(0.0) as u32,
        total_distance_m: info.total_distance.unwrap_or(0.0) as u32,
        first_start_station: info.first_start_station.clone().unwrap_or_default(),
        last_end_station: info.last_end_station.clone().unwrap_or_default(),
    }
}

/// Decompose the itinerary into ordered legs, one per raw sub-path.
pub fn extract_legs(entry: &PathEntry) -> Vec<Leg> {
    entry.sub_path.iter().map(convert_sub_path).collect()
}

fn convert_sub_path(sp: &SubPath) -> Leg {
    let mode = TrafficMode::from_code(sp.traffic_type);

    let stations = sp
        .pass_stop_list
        .as_ref()
        .map(|list| {
            list.stations
                .iter()
                .map(|s| SubwayStop {
                    index: s.index,
                    name: s.station_name.clone().unwrap_or_default(),
                    id: s.station_id,
                    x: s.x.clone(),
                    y: s.y.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    Leg {
        mode,
        section_time_min: sp.section_time.map(|t| t as u32),
        distance_m: sp.distance.map(|d| d as u32),
        start_name: sp.start_name.clone(),
        end_name: sp.end_name.clone(),
        station_count: sp.station_count,
        line_name: line_name(sp, mode),
        stations,
    }
}

/// Derive the normalized line name for a sub-path.
fn line_name(sp: &SubPath, mode: TrafficMode) -> String {
    let mut name = sp
        .lane
        .as_ref()
        .and_then(|lane| lane.name())
        .unwrap_or_default()
        .to_string();

    if name.is_empty() && mode.is_subway() {
        if let Some(code) = sp.subway_code {
            name = format!("{code}호선");
        }
    }

    if let Some(stripped) = name.strip_prefix(METRO_AREA_PREFIX) {
        name = stripped.to_string();
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> PathEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn one_leg_per_sub_path() {
        let path = entry(json!({
            "info": {"totalTime": 42, "payment": 1500},
            "subPath": [
                {"trafficType": 3, "sectionTime": 5, "distance": 350},
                {"trafficType": 1, "sectionTime": 30, "distance": 12000,
                 "startName": "서울역", "endName": "강남역",
                 "lane": {"name": "수도권 2호선"}},
                {"trafficType": 3, "sectionTime": 3, "distance": 200},
            ]
        }));

        let legs = extract_legs(&path);
        assert_eq!(legs.len(), path.sub_path.len());
        assert_eq!(legs[0].mode, TrafficMode::Walk);
        assert_eq!(legs[1].mode, TrafficMode::Subway);
    }

    #[test]
    fn metro_prefix_is_stripped() {
        let path = entry(json!({
            "info": {},
            "subPath": [
                {"trafficType": 1, "lane": {"name": "수도권 수인분당선"}},
                {"trafficType": 1, "lane": [{"name": "수도권 1호선"}]},
            ]
        }));

        let legs = extract_legs(&path);
        assert_eq!(legs[0].line_name, "수인분당선");
        assert_eq!(legs[1].line_name, "1호선");
        assert!(legs.iter().all(|l| !l.line_name.starts_with("수도권 ")));
    }

    #[test]
    fn subway_line_name_synthesized_from_code() {
        let path = entry(json!({
            "info": {},
            "subPath": [{"trafficType": 1, "subwayCode": 2}]
        }));

        assert_eq!(extract_legs(&path)[0].line_name, "2호선");
    }

    #[test]
    fn bus_leg_without_lane_keeps_empty_line_name() {
        // The code-table synthesis only applies to subway legs.
        let path = entry(json!({
            "info": {},
            "subPath": [{"trafficType": 2, "subwayCode": 2}]
        }));

        assert_eq!(extract_legs(&path)[0].line_name, "");
    }

    #[test]
    fn missing_station_list_means_empty_not_error() {
        let path = entry(json!({
            "info": {},
            "subPath": [{"trafficType": 1, "lane": {"name": "2호선"}}]
        }));

        assert!(extract_legs(&path)[0].stations.is_empty());
    }

    #[test]
    fn station_list_is_extracted_in_order() {
        let path = entry(json!({
            "info": {},
            "subPath": [{
                "trafficType": 1,
                "lane": {"name": "2호선"},
                "passStopList": {"stations": [
                    {"index": 0, "stationName": "서울역", "stationID": 227, "x": "126.9725", "y": "37.5546"},
                    {"index": 1, "stationName": "강남역", "stationID": 222, "x": "127.0276", "y": "37.4979"},
                ]}
            }]
        }));

        let stations = &extract_legs(&path)[0].stations;
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "서울역");
        assert_eq!(stations[1].id, Some(222));
        assert_eq!(stations[1].x.as_deref(), Some("127.0276"));
    }

    #[test]
    fn summary_numbers_are_extracted() {
        let path = entry(json!({
            "info": {
                "totalTime": 47, "payment": 1600.0,
                "busTransitCount": 0, "subwayTransitCount": 2,
                "totalWalk": 420, "totalDistance": 14200,
                "firstStartStation": "서울역", "lastEndStation": "강남역"
            },
            "subPath": []
        }));

        let summary = extract_summary(&path);
        assert_eq!(summary.total_time_min, 47);
        assert_eq!(summary.payment_won, 1600);
        assert_eq!(summary.subway_transit_count, 2);
        assert_eq!(summary.first_start_station, "서울역");
        assert_eq!(summary.last_end_station, "강남역");
    }
}
