//! Static lookup tables for the arrivals feed.
//!
//! The feed identifies lines by numeric code and stations by their
//! canonical (sometimes disambiguated) names; these tables bridge the
//! gap to the names used by the routing provider. Immutable, loaded
//! once at compile time.

/// Feed line code → human line name.
const LINE_NAMES: &[(&str, &str)] = &[
    ("1001", "1호선"),
    ("1002", "2호선"),
    ("1003", "3호선"),
    ("1004", "4호선"),
    ("1005", "5호선"),
    ("1006", "6호선"),
    ("1007", "7호선"),
    ("1008", "8호선"),
    ("1009", "9호선"),
    ("1061", "중앙선"),
    ("1063", "경의중앙선"),
    ("1065", "공항철도"),
    ("1067", "경춘선"),
    ("1075", "수인분당선"),
    ("1077", "신분당선"),
];

/// Stations whose canonical feed name differs from the common short name.
const STATION_ALIASES: &[(&str, &str)] = &[("천호", "천호(풍납토성)")];

/// Resolve a feed line code to its human name.
///
/// Unknown codes fall back to `"{code}번"` so they still render and can
/// still participate in substring matching.
pub fn line_name_from_id(subway_id: &str) -> String {
    LINE_NAMES
        .iter()
        .find(|(id, _)| *id == subway_id)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("{subway_id}번"))
}

/// Strip one trailing `역` suffix from a station name.
pub fn strip_station_suffix(name: &str) -> &str {
    name.strip_suffix('역').unwrap_or(name).trim()
}

/// Normalize a station name to the form the feed expects: suffix
/// stripped, then mapped through the alias table.
pub fn canonical_feed_name(name: &str) -> String {
    let cleaned = strip_station_suffix(name);
    STATION_ALIASES
        .iter()
        .find(|(short, _)| *short == cleaned)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_line_codes_resolve() {
        assert_eq!(line_name_from_id("1002"), "2호선");
        assert_eq!(line_name_from_id("1077"), "신분당선");
    }

    #[test]
    fn unknown_line_code_falls_back() {
        assert_eq!(line_name_from_id("9999"), "9999번");
    }

    #[test]
    fn trailing_suffix_is_stripped_once() {
        assert_eq!(strip_station_suffix("서울역"), "서울");
        assert_eq!(strip_station_suffix("강남"), "강남");
        // Only a trailing suffix is removed; interior characters stay.
        assert_eq!(strip_station_suffix("역삼역"), "역삼");
    }

    #[test]
    fn alias_applied_after_suffix_strip() {
        assert_eq!(canonical_feed_name("천호역"), "천호(풍납토성)");
        assert_eq!(canonical_feed_name("천호"), "천호(풍납토성)");
        assert_eq!(canonical_feed_name("서울역"), "서울");
    }
}
