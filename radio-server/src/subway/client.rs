//! Realtime arrivals feed client.

use tracing::warn;

use crate::domain::Arrival;

use super::error::SubwayError;
use super::lines::canonical_feed_name;

/// Default base URL for the Seoul realtime subway feed.
const DEFAULT_BASE_URL: &str = "http://swopenAPI.seoul.go.kr/api/subway";

/// Maximum arrival rows requested per station.
const MAX_ROWS: u32 = 10;

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 8;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Feed status code that marks a successful response.
const STATUS_OK: &str = "INFO-000";

/// Client for the realtime subway arrivals feed.
///
/// Lookups never fail: an unconfigured key, a feed error or a transport
/// failure all yield an empty list (logged at warn level), so a single
/// station's outage cannot take down a route response.
#[derive(Debug, Clone)]
pub struct SubwayClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl SubwayClient {
    /// Create a new feed client. `api_key` of `None` disables lookups.
    pub fn new(api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch live arrivals for a station by its display name.
    ///
    /// The name is normalized (trailing `역` stripped, alias table
    /// applied) before the lookup. Returns an empty list on any failure.
    pub async fn arrivals(&self, station_name: &str) -> Vec<Arrival> {
        let Some(key) = self.api_key.as_deref() else {
            return Vec::new();
        };

        let name = canonical_feed_name(station_name);
        let url = format!(
            "{}/{}/xml/realtimeStationArrival/0/{}/{}",
            self.base_url, key, MAX_ROWS, name
        );

        match self.fetch(&url).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(station = %station_name, error = %e, "realtime arrival lookup failed");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<Arrival>, SubwayError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubwayError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_arrivals(&body)
    }
}

/// Parse the feed's XML payload into arrival rows.
///
/// A response whose embedded status code is not the success sentinel is
/// treated as "no arrivals", not as an error.
pub fn parse_arrivals(xml: &str) -> Result<Vec<Arrival>, SubwayError> {
    let doc = roxmltree::Document::parse(xml)?;

    let status = doc
        .descendants()
        .find(|n| n.has_tag_name("code"))
        .and_then(|n| n.text())
        .unwrap_or("");
    if status != STATUS_OK {
        return Ok(Vec::new());
    }

    let mut arrivals = Vec::new();
    for row in doc.descendants().filter(|n| n.has_tag_name("row")) {
        let text = |tag: &str| {
            row.children()
                .find(|c| c.has_tag_name(tag))
                .and_then(|c| c.text())
                .unwrap_or("")
                .to_string()
        };

        arrivals.push(Arrival {
            subway_id: text("subwayId"),
            train_line: text("trainLineNm"),
            countdown: text("barvlDt"),
            message: text("arvlMsg2"),
            boarding_station: text("bstatnNm"),
        });
    }

    Ok(arrivals)
}
