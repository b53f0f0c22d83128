//! YouTube music search.
//!
//! Searches short videos for "{query} 음악", then looks up durations
//! and prefers videos of at least two minutes. When the duration lookup
//! fails or filters everything out, the unfiltered candidates are
//! returned instead so the caller always gets something to play.

use serde::Serialize;
use serde_json::Value;

use super::error::MusicError;

/// Default base URL for the Data API.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Search page size.
const MAX_RESULTS: usize = 15;

/// Minimum video length to keep, in seconds.
const MIN_DURATION_SECS: u64 = 120;

/// Queries longer than this are truncated before being sent upstream.
const MAX_QUERY_CHARS: usize = 200;

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 15;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub duration_seconds: u64,
}

/// Client for the Data API.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl YoutubeClient {
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

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search music videos for a query. A blank query returns no
    /// videos; a missing key is [`MusicError::NotConfigured`].
    pub async fn search(&self, query: &str) -> Result<Vec<Video>, MusicError> {
        let key = self.api_key.as_deref().ok_or(MusicError::NotConfigured)?;

        let q: String = query.trim().chars().take(MAX_QUERY_CHARS).collect();
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .get_json(
                &format!("{}/search", self.base_url),
                &[
                    ("part", "snippet".to_string()),
                    ("type", "video".to_string()),
                    ("videoDuration", "short".to_string()),
                    ("maxResults", MAX_RESULTS.to_string()),
                    ("q", format!("{q} 음악")),
                    ("key", key.to_string()),
                ],
            )
            .await?;

        let candidates = search_candidates(&body);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let ids = candidates
            .iter()
            .map(|v| v.video_id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let details = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "contentDetails"),
                ("id", ids.as_str()),
                ("key", key),
            ])
            .send()
            .await?;

        // Duration lookup is best-effort; without it the candidates go
        // out with a zero duration.
        if !details.status().is_success() {
            return Ok(candidates);
        }
        let details: Value = details.json().await.map_err(|e| MusicError::Json {
            message: e.to_string(),
        })?;

        Ok(apply_durations(candidates, &details))
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

fn search_candidates(body: &Value) -> Vec<Video> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    items
        .iter()
        .filter_map(|item| {
            let video_id = item.get("id")?.get("videoId")?.as_str()?;
            let snippet = item.get("snippet");
            let text = |key: &str| {
                snippet
                    .and_then(|s| s.get(key))
                    .and_then(Value::as_str)
                    .unwrap_or("-")
                    .to_string()
            };
            Some(Video {
                video_id: video_id.to_string(),
                title: text("title"),
                channel_title: text("channelTitle"),
                duration_seconds: 0,
            })
        })
        .collect()
}

/// Attach looked-up durations and keep videos of at least two minutes,
/// falling back to the full list when that filters everything out.
fn apply_durations(candidates: Vec<Video>, details: &Value) -> Vec<Video> {
    let rows = details
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let duration_of = |id: &str| -> u64 {
        rows.iter()
            .find(|v| v.get("id").and_then(Value::as_str) == Some(id))
            .and_then(|v| v.get("contentDetails"))
            .and_then(|d| d.get("duration"))
            .and_then(Value::as_str)
            .map(parse_iso_duration)
            .unwrap_or(0)
    };

    let with_durations: Vec<Video> = candidates
        .into_iter()
        .map(|mut v| {
            v.duration_seconds = duration_of(&v.video_id);
            v
        })
        .collect();

    let long_enough: Vec<Video> = with_durations
        .iter()
        .filter(|v| v.duration_seconds >= MIN_DURATION_SECS)
        .cloned()
        .collect();

    if long_enough.is_empty() {
        with_durations
    } else {
        long_enough
    }
}

/// Parse an ISO-8601 duration like `PT1H2M30S` into seconds. Anything
/// unparseable is zero.
pub fn parse_iso_duration(iso: &str) -> u64 {
    let Some(rest) = iso.strip_prefix("PT") else {
        return 0;
    };

    let mut total = 0u64;
    let mut digits = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let value: u64 = digits.parse().unwrap_or(0);
        digits.clear();
        total += match ch {
            'H' => value * 3600,
            'M' => value * 60,
            'S' => value,
            _ => return 0,
        };
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn iso_durations_parse_to_seconds() {
        assert_eq!(parse_iso_duration("PT1H2M30S"), 3750);
        assert_eq!(parse_iso_duration("PT3M"), 180);
        assert_eq!(parse_iso_duration("PT45S"), 45);
        assert_eq!(parse_iso_duration("PT2H"), 7200);
        assert_eq!(parse_iso_duration("P1D"), 0);
        assert_eq!(parse_iso_duration(""), 0);
        assert_eq!(parse_iso_duration("PT"), 0);
    }

    #[test]
    fn candidates_require_a_video_id() {
        let body = json!({"items": [
            {"id": {"videoId": "abc"}, "snippet": {"title": "노래", "channelTitle": "채널"}},
            {"id": {"kind": "youtube#channel"}, "snippet": {"title": "무시"}}
        ]});
        let candidates = search_candidates(&body);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].video_id, "abc");
        assert_eq!(candidates[0].title, "노래");
    }

    #[test]
    fn short_videos_are_filtered_when_longer_ones_exist() {
        let candidates = vec![
            Video {
                video_id: "short".to_string(),
                title: "-".to_string(),
                channel_title: "-".to_string(),
                duration_seconds: 0,
            },
            Video {
                video_id: "long".to_string(),
                title: "-".to_string(),
                channel_title: "-".to_string(),
                duration_seconds: 0,
            },
        ];
        let details = json!({"items": [
            {"id": "short", "contentDetails": {"duration": "PT1M"}},
            {"id": "long", "contentDetails": {"duration": "PT3M20S"}}
        ]});

        let videos = apply_durations(candidates, &details);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "long");
        assert_eq!(videos[0].duration_seconds, 200);
    }

    #[test]
    fn all_short_falls_back_to_everything() {
        let candidates = vec![Video {
            video_id: "only".to_string(),
            title: "-".to_string(),
            channel_title: "-".to_string(),
            duration_seconds: 0,
        }];
        let details = json!({"items": [
            {"id": "only", "contentDetails": {"duration": "PT50S"}}
        ]});

        let videos = apply_durations(candidates, &details);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].duration_seconds, 50);
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let client = YoutubeClient::new(None).unwrap();
        let err = client.search("아이유").await.unwrap_err();
        assert!(matches!(err, MusicError::NotConfigured));
    }
}
