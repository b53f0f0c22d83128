//! Place-search HTTP client.

use serde::Serialize;
use tracing::warn;

use crate::domain::Coordinate;

use super::error::KakaoError;
use super::types::{Document, SearchResponse};

/// Default base URL for the local-search API.
const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";

/// Address-style search endpoint, tried first.
const ADDRESS_PATH: &str = "/v2/local/search/address.json";

/// Keyword-style search endpoint, the fallback.
const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";

/// Queries longer than this are truncated before being sent upstream.
const MAX_QUERY_CHARS: usize = 200;

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 10;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// One autocomplete suggestion for the settings screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSuggestion {
    pub name: String,
    pub address: String,
    pub category: String,
    pub x: String,
    pub y: String,
}

/// Client for the place-search API.
#[derive(Debug, Clone)]
pub struct KakaoClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl KakaoClient {
    /// Create a new place-search client. `api_key` of `None` makes
    /// geocoding fail with [`KakaoError::NotConfigured`] and
    /// autocomplete return no suggestions.
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

    /// Resolve a free-text place query to a coordinate pair.
    ///
    /// Tries the address endpoint, then the keyword endpoint; a non-2xx
    /// reply from one endpoint falls through to the next. Returns the
    /// first document of whichever endpoint answers first.
    pub async fn geocode(&self, query: &str) -> Result<Coordinate, KakaoError> {
        let key = self.api_key.as_deref().ok_or(KakaoError::NotConfigured)?;

        let q: String = query.trim().chars().take(MAX_QUERY_CHARS).collect();
        if q.is_empty() {
            return Err(KakaoError::NoResult(query.to_string()));
        }

        for path in [ADDRESS_PATH, KEYWORD_PATH] {
            let response = self
                .http
                .get(format!("{}{}", self.base_url, path))
                .header("Authorization", format!("KakaoAK {key}"))
                .query(&[("query", q.as_str())])
                .send()
                .await?;

            if !response.status().is_success() {
                continue;
            }

            let body: SearchResponse = response.json().await.map_err(|e| KakaoError::Json {
                message: e.to_string(),
            })?;

            if let Some(doc) = body.documents.first() {
                return coordinate_of(doc);
            }
        }

        Err(KakaoError::NoResult(query.to_string()))
    }

    /// Keyword-search autocomplete for place input fields.
    ///
    /// Never fails: a missing key or any upstream problem yields an
    /// empty list, logged at warn level.
    pub async fn autocomplete(&self, query: &str, limit: usize) -> Vec<PlaceSuggestion> {
        let Some(key) = self.api_key.as_deref() else {
            return Vec::new();
        };
        let q: String = query.trim().chars().take(100).collect();
        if q.is_empty() {
            return Vec::new();
        }

        match self.keyword_search(key, &q, limit).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(query = %query, error = %e, "place autocomplete failed");
                Vec::new()
            }
        }
    }

    async fn keyword_search(
        &self,
        key: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, KakaoError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, KEYWORD_PATH))
            .header("Authorization", format!("KakaoAK {key}"))
            .query(&[("query", query.to_string()), ("size", limit.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KakaoError::Json {
                message: format!("keyword search returned {status}"),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| KakaoError::Json {
            message: e.to_string(),
        })?;

        Ok(body
            .documents
            .into_iter()
            .take(limit)
            .map(|doc| PlaceSuggestion {
                name: doc.place_name.unwrap_or_default(),
                address: doc
                    .road_address_name
                    .filter(|a| !a.is_empty())
                    .or(doc.address_name)
                    .unwrap_or_default(),
                category: doc.category_group_name.unwrap_or_default(),
                x: doc.x,
                y: doc.y,
            })
            .collect())
    }
}

fn coordinate_of(doc: &Document) -> Result<Coordinate, KakaoError> {
    let parse = |axis: &str, value: &str| {
        value.parse::<f64>().map_err(|_| KakaoError::Json {
            message: format!("invalid {axis} coordinate: {value:?}"),
        })
    };
    Ok(Coordinate {
        x: parse("x", &doc.x)?,
        y: parse("y", &doc.y)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    /// Serve a router on a loopback port and return its base URL.
    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> KakaoClient {
        KakaoClient::new(Some("test-key".to_string()))
            .unwrap()
            .with_base_url(base_url)
    }

    #[tokio::test]
    async fn geocode_prefers_the_address_endpoint() {
        let app = Router::new()
            .route(
                ADDRESS_PATH,
                get(|| async {
                    Json(json!({"documents": [{"x": "126.9725", "y": "37.5546"}]}))
                }),
            )
            .route(
                KEYWORD_PATH,
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );

        let coord = client(spawn(app).await).geocode("서울역").await.unwrap();
        assert!((coord.x - 126.9725).abs() < 1e-9);
        assert!((coord.y - 37.5546).abs() < 1e-9);
    }

    #[tokio::test]
    async fn geocode_falls_back_to_keyword_search() {
        let app = Router::new()
            .route(ADDRESS_PATH, get(|| async { Json(json!({"documents": []})) }))
            .route(
                KEYWORD_PATH,
                get(|| async {
                    Json(json!({"documents": [
                        {"x": "127.0276", "y": "37.4979", "place_name": "강남역"}
                    ]}))
                }),
            );

        let coord = client(spawn(app).await).geocode("강남역").await.unwrap();
        assert!((coord.x - 127.0276).abs() < 1e-9);
    }

    #[tokio::test]
    async fn geocode_with_no_results_anywhere_is_not_found() {
        let app = Router::new()
            .route(ADDRESS_PATH, get(|| async { Json(json!({"documents": []})) }))
            .route(KEYWORD_PATH, get(|| async { Json(json!({"documents": []})) }));

        let err = client(spawn(app).await)
            .geocode("존재하지않는곳")
            .await
            .unwrap_err();
        assert!(matches!(err, KakaoError::NoResult(_)));
    }

    #[tokio::test]
    async fn geocode_without_key_is_not_configured() {
        let client = KakaoClient::new(None).unwrap();
        let err = client.geocode("서울역").await.unwrap_err();
        assert!(matches!(err, KakaoError::NotConfigured));
    }

    #[tokio::test]
    async fn geocode_rejects_blank_query_without_io() {
        let client = KakaoClient::new(Some("k".to_string()))
            .unwrap()
            .with_base_url("http://127.0.0.1:1".to_string());
        let err = client.geocode("   ").await.unwrap_err();
        assert!(matches!(err, KakaoError::NoResult(_)));
    }

    #[tokio::test]
    async fn autocomplete_swallows_upstream_failure() {
        let app = Router::new().route(
            KEYWORD_PATH,
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let results = client(spawn(app).await).autocomplete("강남", 5).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn autocomplete_maps_documents() {
        let app = Router::new().route(
            KEYWORD_PATH,
            get(|| async {
                Json(json!({"documents": [{
                    "x": "127.0276", "y": "37.4979",
                    "place_name": "강남역 2호선",
                    "road_address_name": "서울 강남구 강남대로 지하 396",
                    "category_group_name": "지하철역"
                }]}))
            }),
        );

        let results = client(spawn(app).await).autocomplete("강남역", 5).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "강남역 2호선");
        assert_eq!(results[0].category, "지하철역");
    }
}
