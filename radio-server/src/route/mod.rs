//! Route assembly: itinerary legs + realtime arrivals.
//!
//! Derives the subway boarding/transfer points from the leg list, looks
//! up live arrivals for each and narrows them with a three-tier
//! fallback: direction-matched, else line-matched, else the full
//! unfiltered feed. A wrong-direction arrival is more useful to the
//! rider than no information, so a station with feed data always keeps
//! an entry.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Arrival, Coordinate, Leg, RouteSummary, SubwayRouteInfo, TrafficMode};
use crate::subway::{SubwayClient, filter_by_direction, filter_by_line};

/// Source of realtime arrivals, abstracted so the assembler can be
/// exercised against stub feeds. A failed lookup is an empty list.
pub trait ArrivalSource {
    async fn arrivals(&self, station_name: &str) -> Vec<Arrival>;
}

impl ArrivalSource for SubwayClient {
    async fn arrivals(&self, station_name: &str) -> Vec<Arrival> {
        SubwayClient::arrivals(self, station_name).await
    }
}

/// The assembled response for one routing request.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub summary: RouteSummary,
    pub legs: Vec<Leg>,
    pub start_coords: Coordinate,
    pub end_coords: Coordinate,

    /// Station name → live arrivals relevant to the planned legs.
    /// A station appears only when the feed returned at least one row.
    pub realtime_subway: HashMap<String, Vec<Arrival>>,
}

/// Derive the realtime-lookup targets from the leg list: one entry per
/// subway leg's start, plus one for a leg's end when it is immediately
/// followed by another subway leg (a transfer point shared between the
/// two legs, described by the *next* leg).
pub fn subway_route_infos(legs: &[Leg]) -> Vec<SubwayRouteInfo> {
    let mut infos = Vec::new();

    for (idx, leg) in legs.iter().enumerate() {
        if !leg.mode.is_subway() {
            continue;
        }

        if let Some(start) = leg.start_name.as_deref().filter(|s| !s.is_empty()) {
            infos.push(SubwayRouteInfo {
                station: start.to_string(),
                line: leg.line_name.clone(),
                destination: leg.end_name.clone().unwrap_or_default(),
                stations: station_names(leg),
                is_transfer: !infos.is_empty(),
            });
        }

        let end = leg.end_name.as_deref().filter(|s| !s.is_empty());
        if let (Some(end), Some(next)) = (end, legs.get(idx + 1)) {
            if next.mode == TrafficMode::Subway {
                infos.push(SubwayRouteInfo {
                    station: end.to_string(),
                    line: next.line_name.clone(),
                    destination: next.end_name.clone().unwrap_or_default(),
                    stations: station_names(next),
                    is_transfer: true,
                });
            }
        }
    }

    infos
}

fn station_names(leg: &Leg) -> Vec<String> {
    leg.stations
        .iter()
        .map(|s| s.name.clone())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Compose the full route response, fetching live arrivals for every
/// subway boarding/transfer point.
///
/// Lookups run sequentially; a station queried twice (arrival point of
/// one leg and departure point of the next) keeps the last write.
pub async fn assemble<S: ArrivalSource>(
    source: &S,
    summary: RouteSummary,
    legs: Vec<Leg>,
    start: Coordinate,
    end: Coordinate,
) -> RouteResponse {
    let mut realtime_subway = HashMap::new();

    for info in subway_route_infos(&legs) {
        let arrivals = source.arrivals(&info.station).await;
        if arrivals.is_empty() {
            continue;
        }
        realtime_subway.insert(info.station.clone(), select_arrivals(arrivals, &info));
    }

    RouteResponse {
        summary,
        legs,
        start_coords: start,
        end_coords: end,
        realtime_subway,
    }
}

/// Three-tier narrowing: direction-matched, else line-matched, else
/// everything the feed returned.
fn select_arrivals(arrivals: Vec<Arrival>, info: &SubwayRouteInfo) -> Vec<Arrival> {
    let by_direction = filter_by_direction(&arrivals, info);
    if !by_direction.is_empty() {
        return by_direction;
    }

    let by_line = filter_by_line(&arrivals, &info.line);
    if !by_line.is_empty() {
        return by_line;
    }

    arrivals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubwayStop;

    struct StubArrivals {
        by_station: HashMap<String, Vec<Arrival>>,
    }

    impl StubArrivals {
        fn new(entries: &[(&str, Vec<Arrival>)]) -> Self {
            Self {
                by_station: entries
                    .iter()
                    .map(|(name, rows)| (name.to_string(), rows.clone()))
                    .collect(),
            }
        }
    }

    impl ArrivalSource for StubArrivals {
        async fn arrivals(&self, station_name: &str) -> Vec<Arrival> {
            self.by_station
                .get(station_name)
                .cloned()
                .unwrap_or_default()
        }
    }

    fn stop(name: &str) -> SubwayStop {
        SubwayStop {
            index: None,
            name: name.to_string(),
            id: None,
            x: None,
            y: None,
        }
    }

    fn walk_leg() -> Leg {
        Leg {
            mode: TrafficMode::Walk,
            section_time_min: Some(5),
            distance_m: Some(350),
            start_name: None,
            end_name: None,
            station_count: None,
            line_name: String::new(),
            stations: Vec::new(),
        }
    }

    fn subway_leg(line: &str, start: &str, end: &str, stations: &[&str]) -> Leg {
        Leg {
            mode: TrafficMode::Subway,
            section_time_min: Some(30),
            distance_m: Some(12000),
            start_name: Some(start.to_string()),
            end_name: Some(end.to_string()),
            station_count: Some(stations.len() as u32),
            line_name: line.to_string(),
            stations: stations.iter().map(|s| stop(s)).collect(),
        }
    }

    fn arrival(subway_id: &str, train_line: &str, boarding_station: &str) -> Arrival {
        Arrival {
            subway_id: subway_id.to_string(),
            train_line: train_line.to_string(),
            countdown: "180".to_string(),
            message: "3분 후".to_string(),
            boarding_station: boarding_station.to_string(),
        }
    }

    fn coord() -> Coordinate {
        Coordinate { x: 127.0, y: 37.5 }
    }

    #[test]
    fn infos_cover_starts_and_transfer_points() {
        let legs = vec![
            walk_leg(),
            subway_leg("2호선", "서울역", "왕십리역", &["서울역", "왕십리역"]),
            subway_leg("수인분당선", "왕십리역", "선릉역", &["왕십리역", "선릉역"]),
            walk_leg(),
        ];

        let infos = subway_route_infos(&legs);
        // Start of leg 1, end of leg 1 (transfer point), start of leg 2.
        assert_eq!(infos.len(), 3);

        assert_eq!(infos[0].station, "서울역");
        assert_eq!(infos[0].line, "2호선");
        assert_eq!(infos[0].destination, "왕십리역");
        assert!(!infos[0].is_transfer);

        // The transfer entry is described by the *next* leg.
        assert_eq!(infos[1].station, "왕십리역");
        assert_eq!(infos[1].line, "수인분당선");
        assert_eq!(infos[1].destination, "선릉역");
        assert!(infos[1].is_transfer);

        assert_eq!(infos[2].station, "왕십리역");
        assert!(infos[2].is_transfer);
    }

    #[test]
    fn first_subway_entry_is_not_a_transfer_even_after_a_walk() {
        let legs = vec![walk_leg(), subway_leg("2호선", "서울역", "강남역", &[])];
        let infos = subway_route_infos(&legs);
        assert_eq!(infos.len(), 1);
        assert!(!infos[0].is_transfer);
    }

    #[tokio::test]
    async fn direction_matched_arrivals_win() {
        let legs = vec![subway_leg(
            "2호선",
            "서울역",
            "강남역",
            &["서울역", "강남역"],
        )];
        let feed = StubArrivals::new(&[(
            "서울역",
            vec![
                arrival("1002", "성수행 - 강남방면", "성수"),
                arrival("1002", "성수행 - 시청방면", "성수"),
            ],
        )]);

        let response =
            assemble(&feed, RouteSummary::default(), legs, coord(), coord()).await;
        let rows = &response.realtime_subway["서울역"];
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].train_line, "성수행 - 강남방면");
    }

    #[tokio::test]
    async fn line_matched_subset_when_no_direction_matches() {
        let legs = vec![subway_leg("2호선", "서울역", "강남역", &[])];
        // Neither row matches direction (labels mention no planned
        // station), but one is on the planned line.
        let feed = StubArrivals::new(&[(
            "서울역",
            vec![
                arrival("1002", "외선순환", "성수"),
                arrival("1004", "당고개행", "당고개"),
            ],
        )]);

        let response =
            assemble(&feed, RouteSummary::default(), legs, coord(), coord()).await;
        let rows = &response.realtime_subway["서울역"];
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subway_id, "1002");
    }

    #[tokio::test]
    async fn unfiltered_feed_when_nothing_matches_the_line() {
        let legs = vec![subway_leg("9호선", "당산역", "여의도역", &[])];
        let feed = StubArrivals::new(&[(
            "당산역",
            vec![
                arrival("1002", "외선순환", "성수"),
                arrival("1004", "당고개행", "당고개"),
            ],
        )]);

        let response =
            assemble(&feed, RouteSummary::default(), legs, coord(), coord()).await;
        // Never an empty entry when the feed had data.
        assert_eq!(response.realtime_subway["당산역"].len(), 2);
    }

    #[tokio::test]
    async fn empty_feed_omits_the_station_entry() {
        let legs = vec![
            subway_leg("2호선", "서울역", "왕십리역", &[]),
            subway_leg("수인분당선", "왕십리역", "선릉역", &[]),
        ];
        // 서울역 lookup fails (empty); 왕십리역 has data.
        let feed = StubArrivals::new(&[(
            "왕십리역",
            vec![arrival("1075", "인천행 - 선릉방면", "청량리")],
        )]);

        let response =
            assemble(&feed, RouteSummary::default(), legs, coord(), coord()).await;
        assert_eq!(response.legs.len(), 2);
        assert!(!response.realtime_subway.contains_key("서울역"));
        assert_eq!(response.realtime_subway["왕십리역"].len(), 1);
    }

    #[tokio::test]
    async fn duplicate_station_keeps_one_entry() {
        let legs = vec![
            subway_leg("2호선", "서울역", "왕십리역", &[]),
            subway_leg("수인분당선", "왕십리역", "선릉역", &["왕십리역", "선릉역"]),
        ];
        let feed = StubArrivals::new(&[
            ("서울역", vec![arrival("1002", "성수행", "성수")]),
            (
                "왕십리역",
                vec![arrival("1075", "인천행 - 선릉방면", "청량리")],
            ),
        ]);

        let response =
            assemble(&feed, RouteSummary::default(), legs, coord(), coord()).await;
        // 왕십리역 is queried as leg 1's arrival and leg 2's departure;
        // the map holds a single entry for it.
        assert_eq!(response.realtime_subway.len(), 2);
        assert_eq!(response.realtime_subway["왕십리역"].len(), 1);
    }

    #[tokio::test]
    async fn commute_scenario_keeps_exactly_the_matching_arrival() {
        let legs = vec![
            walk_leg(),
            subway_leg("2호선", "서울역", "강남역", &["서울역", "강남역"]),
        ];
        let feed = StubArrivals::new(&[(
            "서울역",
            vec![arrival("1002", "성수행 - 강남방면", "성수")],
        )]);

        let response = assemble(
            &feed,
            RouteSummary::default(),
            legs,
            Coordinate {
                x: 126.9725,
                y: 37.5546,
            },
            Coordinate {
                x: 127.0276,
                y: 37.4979,
            },
        )
        .await;

        let rows = &response.realtime_subway["서울역"];
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].train_line, "성수행 - 강남방면");
    }

    #[test]
    fn response_serializes_with_expected_keys() {
        let response = RouteResponse {
            summary: RouteSummary::default(),
            legs: vec![],
            start_coords: coord(),
            end_coords: coord(),
            realtime_subway: HashMap::new(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("summary").is_some());
        assert!(value.get("legs").is_some());
        assert!(value.get("start_coords").is_some());
        assert!(value.get("realtime_subway").is_some());
    }
}
