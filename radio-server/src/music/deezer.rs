//! Deezer chart and track search.
//!
//! No API key required. Tracks without a 30-second preview URL are
//! dropped since the player has nothing to play for them. The chart
//! endpoint has returned `tracks` both as a bare list and as an object
//! with a `data` list, so both shapes are accepted.

use serde::Serialize;
use serde_json::Value;

use super::error::MusicError;

/// Default base URL for the Deezer API.
const DEFAULT_BASE_URL: &str = "https://api.deezer.com";

/// Chart page size.
const CHART_LIMIT: usize = 50;

/// Default search page size.
const SEARCH_LIMIT: usize = 30;

/// Queries longer than this are truncated before being sent upstream.
const MAX_QUERY_CHARS: usize = 200;

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 15;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// One playable track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: Option<i64>,
    pub name: String,
    pub artists: Vec<Artist>,
    pub preview_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub name: String,
}

/// Client for the Deezer API.
#[derive(Debug, Clone)]
pub struct DeezerClient {
    http: reqwest::Client,
    base_url: String,
}

impl DeezerClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch the global top-tracks chart.
    pub async fn chart(&self) -> Result<Vec<Track>, MusicError> {
        let body = self
            .get_json(
                &format!("{}/chart/0/tracks", self.base_url),
                &[("limit", CHART_LIMIT.to_string())],
            )
            .await?;

        Ok(normalize_tracks(chart_rows(&body)))
    }

    /// Search tracks by free text. A blank query returns no tracks.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>, MusicError> {
        let q: String = query.trim().chars().take(MAX_QUERY_CHARS).collect();
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .get_json(
                &format!("{}/search", self.base_url),
                &[("q", q), ("limit", SEARCH_LIMIT.to_string())],
            )
            .await?;

        let rows = body.get("data").and_then(Value::as_array);
        Ok(normalize_tracks(rows.map(Vec::as_slice).unwrap_or_default()))
    }

    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Value, MusicError> {
        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MusicError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response.json().await.map_err(|e| MusicError::Json {
            message: e.to_string(),
        })
    }
}

/// Pull the track rows out of a chart response, whichever shape the
/// `tracks` field took.
fn chart_rows(body: &Value) -> &[Value] {
    let rows = match body.get("tracks") {
        Some(Value::Array(rows)) => Some(rows),
        Some(Value::Object(obj)) => obj.get("data").and_then(Value::as_array),
        _ => body.get("data").and_then(Value::as_array),
    };
    rows.map(Vec::as_slice).unwrap_or_default()
}

fn normalize_tracks(rows: &[Value]) -> Vec<Track> {
    rows.iter().filter_map(normalize_track).collect()
}

fn normalize_track(raw: &Value) -> Option<Track> {
    let preview = raw
        .get("preview")
        .or_else(|| raw.get("preview_url"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())?;

    let name = raw
        .get("title")
        .or_else(|| raw.get("title_short"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("-");

    let artist = raw
        .get("artist")
        .and_then(|a| a.get("name"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown");

    Some(Track {
        id: raw.get("id").and_then(Value::as_i64),
        name: name.to_string(),
        artists: vec![Artist {
            name: artist.to_string(),
        }],
        preview_url: preview.to_string(),
    })
}
