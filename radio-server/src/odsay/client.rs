//! Routing provider HTTP client.

use crate::domain::Coordinate;

use super::convert::{extract_legs, extract_summary};
use super::error::OdsayError;
use super::types::SearchPathResponse;
use super::{PlannedRoute, RoutePreference};

/// Default base URL for the ODsay API.
const DEFAULT_BASE_URL: &str = "https://api.odsay.com/v1/api";

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 15;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Client for the transit path-search API.
#[derive(Debug, Clone)]
pub struct OdsayClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OdsayClient {
    /// Create a new routing client. `api_key` of `None` makes every
    /// request fail with [`OdsayError::NotConfigured`].
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

    /// Search a transit path between two coordinates and return the
    /// provider's first-ranked itinerary.
    pub async fn find_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        preference: RoutePreference,
    ) -> Result<PlannedRoute, OdsayError> {
        let key = self.api_key.as_deref().ok_or(OdsayError::NotConfigured)?;

        let url = format!("{}/searchPubTransPathT", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("SX", start.x.to_string()),
                ("SY", start.y.to_string()),
                ("EX", end.x.to_string()),
                ("EY", end.y.to_string()),
                ("OPT", preference.code().to_string()),
                ("apiKey", key.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OdsayError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchPathResponse =
            serde_json::from_str(&body).map_err(|e| OdsayError::Json {
                message: e.to_string(),
            })?;

        // The provider's first-ranked path is taken as-is.
        let best = parsed
            .result
            .and_then(|r| r.path.into_iter().next())
            .ok_or(OdsayError::NoRoute)?;

        Ok(PlannedRoute {
            summary: extract_summary(&best),
            legs: extract_legs(&best),
        })
    }
}
