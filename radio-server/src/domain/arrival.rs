//! Realtime arrival rows from the subway feed.

use serde::Serialize;

/// One live train prediction at a station.
///
/// Fetched fresh from the feed on every routing request and never cached.
/// The feed mixes all lines serving the station and both directions; see
/// [`crate::subway::filter`] for how rows are narrowed to the planned leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Arrival {
    /// Provider line code, e.g. `1002` for line 2.
    pub subway_id: String,

    /// Human direction label, e.g. `성수행 - 시청방면`.
    pub train_line: String,

    /// Seconds until arrival, as the string the feed sends.
    pub countdown: String,

    /// Arrival message, e.g. `3분 후 (전역 출발)`.
    pub message: String,

    /// Boarding-origin / terminus station name from the feed.
    pub boarding_station: String,
}
