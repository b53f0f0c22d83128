//! Request and response DTOs for the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::kakao::PlaceSuggestion;
use crate::music::{Track, Video};
use crate::news::Article;
use crate::script::NewsItem;

fn default_section() -> String {
    "all".to_string()
}

/// POST /nav/route body: free-text start and end plus a route
/// preference code (0=recommended, 1=fastest, 2=fewest transfers).
#[derive(Debug, Deserialize)]
pub struct NavRouteRequest {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub opt: u8,
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub results: Vec<PlaceSuggestion>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default = "default_lat")]
    pub lat: f64,
    #[serde(default = "default_lon")]
    pub lon: f64,
    #[serde(default = "default_location_name")]
    pub location_name: String,
}

fn default_lat() -> f64 {
    37.5665
}

fn default_lon() -> f64 {
    126.978
}

fn default_location_name() -> String {
    "서울".to_string()
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub weather_text: String,
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    #[serde(default = "default_section")]
    pub section: String,
    /// Comma-separated section list. When present, `section` is
    /// ignored and each named section contributes `per_section` items.
    #[serde(default)]
    pub sections: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_per_section")]
    pub per_section: usize,
}

fn default_page_size() -> usize {
    15
}

fn default_per_section() -> usize {
    1
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct MusicChartResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct MusicSearchQuery {
    pub q: String,
    #[serde(default = "default_music_source")]
    pub source: String,
}

fn default_music_source() -> String {
    "deezer".to_string()
}

/// Music search result, shaped by which provider answered.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MusicSearchResponse {
    Deezer {
        source: &'static str,
        tracks: Vec<Track>,
    },
    Youtube {
        source: &'static str,
        videos: Vec<Video>,
    },
}

#[derive(Debug, Deserialize)]
pub struct GreetingScriptRequest {
    #[serde(default)]
    pub weather_text: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub dj_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsScriptRequest {
    #[serde(default)]
    pub news_items: Option<Vec<NewsItem>>,
    #[serde(default = "default_section")]
    pub news_section: String,
    #[serde(default)]
    pub previous_greeting: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsSegmentsRequest {
    #[serde(default)]
    pub news_items: Option<Vec<NewsItem>>,
    #[serde(default = "default_section")]
    pub news_section: String,
    #[serde(default)]
    pub dj_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClosingScriptRequest {
    #[serde(default)]
    pub previous_script: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FullScriptRequest {
    #[serde(default)]
    pub weather_text: Option<String>,
    #[serde(default)]
    pub news_items: Option<Vec<NewsItem>>,
    #[serde(default = "default_section")]
    pub news_section: String,
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub script: String,
}

#[derive(Debug, Serialize)]
pub struct ScriptsResponse {
    pub scripts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub llm_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ok: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub status: &'static str,
}
