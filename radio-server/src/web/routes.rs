//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use tracing::{info, warn};

use crate::odsay::RoutePreference;
use crate::route::{self, RouteResponse};
use crate::script::{
    self, CLOSING_MAX_TOKENS, FULL_MAX_TOKENS, GREETING_MAX_TOKENS, NEWS_MAX_TOKENS,
    NewsItem, SEGMENTS_MAX_TOKENS, ScriptError, prompts, truncate_chars,
};

use super::dto::*;
use super::error::AppError;
use super::state::AppState;

/// Max autocomplete suggestions.
const AUTOCOMPLETE_LIMIT: usize = 5;

/// At most this many sections in a multi-section news query.
const MAX_SECTIONS: usize = 10;

/// News items fed into single-script prompts.
const SCRIPT_NEWS_ITEMS: usize = 3;

/// Character caps applied before text goes into a prompt.
const WEATHER_TEXT_CHARS: usize = 500;
const NEWS_TITLE_CHARS: usize = 200;
const NEWS_SUMMARY_CHARS: usize = 3000;
const PREVIOUS_GREETING_CHARS: usize = 500;
const PREVIOUS_SCRIPT_CHARS: usize = 800;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/place/autocomplete", get(place_autocomplete))
        .route("/nav/route", post(nav_route))
        .route("/weather", get(weather))
        .route("/news", get(news))
        .route("/music/chart", get(music_chart))
        .route("/music/search", get(music_search))
        .route("/radio-script/ready", get(radio_script_ready))
        .route("/radio-script", post(create_full_script))
        .route("/radio-script/greeting", post(create_greeting_script))
        .route("/radio-script/news", post(create_news_script))
        .route("/radio-script/news-segments", post(create_news_segments))
        .route("/radio-script/closing", post(create_closing_script))
        .with_state(state)
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "radio-server",
        status: "ok",
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.llm.is_configured() {
            "healthy"
        } else {
            "no_llm_config"
        },
        llm_configured: state.llm.is_configured(),
    })
}

/// Place autocomplete for the settings screen. Never fails; upstream
/// problems show up as an empty result list.
async fn place_autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Json<AutocompleteResponse> {
    let results = state.kakao.autocomplete(&query.q, AUTOCOMPLETE_LIMIT).await;
    Json(AutocompleteResponse { results })
}

/// Plan a transit route between two free-text places and attach live
/// subway arrivals for the boarding and transfer stations.
async fn nav_route(
    State(state): State<AppState>,
    Json(req): Json<NavRouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let start = req.start.trim();
    let end = req.end.trim();
    if start.is_empty() || end.is_empty() {
        return Err(AppError::bad_request(
            "nav_route_error",
            "start and end must not be empty",
        ));
    }
    let preference = RoutePreference::from_code(req.opt).ok_or_else(|| {
        AppError::bad_request("nav_route_error", format!("invalid opt: {}", req.opt))
    })?;

    let (start_coord, end_coord) = tokio::join!(
        state.kakao.geocode(start),
        state.kakao.geocode(end),
    );
    let start_coord = start_coord?;
    let end_coord = end_coord?;

    let planned = state
        .odsay
        .find_route(start_coord, end_coord, preference)
        .await?;

    let response = route::assemble(
        state.subway.as_ref(),
        planned.summary,
        planned.legs,
        start_coord,
        end_coord,
    )
    .await;

    Ok(Json(response))
}

/// Weather briefing. Upstream failures degrade to a fallback line so
/// the script endpoints always have something to read.
async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherResponse> {
    let weather_text = match state
        .weather
        .weather_text(query.lat, query.lon, &query.location_name)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "weather fetch failed");
            format!("오늘 {} 날씨 정보를 가져올 수 없습니다.", query.location_name)
        }
    };
    Json(WeatherResponse { weather_text })
}

async fn news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Json<NewsResponse> {
    let articles = match &query.sections {
        Some(sections) => {
            let sections: Vec<String> = sections
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(MAX_SECTIONS)
                .map(str::to_string)
                .collect();
            let per_section = query.per_section.clamp(1, 5);
            state.news.fetch_per_sections(&sections, per_section).await
        }
        None => {
            let page_size = query.page_size.clamp(1, 50);
            state.news.fetch(&query.section, page_size).await
        }
    };
    Json(NewsResponse { articles })
}

async fn music_chart(
    State(state): State<AppState>,
) -> Result<Json<MusicChartResponse>, AppError> {
    let tracks = state.deezer.chart().await.map_err(|e| {
        AppError::internal("music_chart_failed", e.to_string())
    })?;
    Ok(Json(MusicChartResponse { tracks }))
}

async fn music_search(
    State(state): State<AppState>,
    Query(query): Query<MusicSearchQuery>,
) -> Result<Json<MusicSearchResponse>, AppError> {
    match query.source.as_str() {
        "deezer" => {
            let tracks = state.deezer.search(&query.q).await?;
            Ok(Json(MusicSearchResponse::Deezer {
                source: "deezer",
                tracks,
            }))
        }
        "youtube" => {
            let videos = state.youtube.search(&query.q).await?;
            if videos.is_empty() {
                warn!(q = %query.q, "music search returned no videos");
            }
            Ok(Json(MusicSearchResponse::Youtube {
                source: "youtube",
                videos,
            }))
        }
        other => Err(AppError::bad_request(
            "music_search_failed",
            format!("source must be deezer or youtube, got {other:?}"),
        )),
    }
}

/// Liveness probe for the script pipeline. Makes no LLM call.
async fn radio_script_ready() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        ok: true,
        message: "서버 응답 정상. LLM 설정 여부는 GET /health 로 확인하세요.",
    })
}

/// Resolve the weather text for a prompt: the caller's own text when
/// given, otherwise a fresh fetch for the default location.
async fn resolve_weather_text(state: &AppState, provided: Option<String>) -> String {
    if let Some(text) = provided.filter(|t| !t.trim().is_empty()) {
        return truncate_chars(&text, WEATHER_TEXT_CHARS);
    }

    let query = WeatherQuery {
        lat: 37.5665,
        lon: 126.978,
        location_name: "서울".to_string(),
    };
    match state
        .weather
        .weather_text(query.lat, query.lon, &query.location_name)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "weather fetch for script failed");
            "오늘 날씨 정보를 가져올 수 없습니다.".to_string()
        }
    }
}

/// Resolve news items for a prompt: the caller's own items when given,
/// otherwise a fresh fetch from the news provider. Titles and
/// summaries are capped before they reach the prompt.
async fn resolve_news_items(
    state: &AppState,
    provided: Option<Vec<NewsItem>>,
    section: &str,
    take: usize,
) -> Vec<NewsItem> {
    let items = match provided {
        Some(items) => items,
        None => {
            info!(section, "fetching news for script");
            state
                .news
                .fetch(section, take)
                .await
                .into_iter()
                .map(|a| NewsItem {
                    title: a.title,
                    summary: a.summary,
                })
                .collect()
        }
    };

    items
        .into_iter()
        .take(take)
        .map(|item| NewsItem {
            title: truncate_chars(&item.title, NEWS_TITLE_CHARS),
            summary: truncate_chars(&item.summary, NEWS_SUMMARY_CHARS),
        })
        .collect()
}

async fn create_greeting_script(
    State(state): State<AppState>,
    Json(req): Json<GreetingScriptRequest>,
) -> Result<Json<ScriptResponse>, AppError> {
    state.llm.check_configured()?;

    let weather_text = resolve_weather_text(&state, req.weather_text).await;
    let (system, user) = prompts::greeting(
        &weather_text,
        req.user_name.as_deref(),
        req.dj_name.as_deref(),
    );

    let script = state.llm.complete(&system, &user, GREETING_MAX_TOKENS).await?;
    info!(chars = script.chars().count(), "greeting script generated");
    Ok(Json(ScriptResponse { script }))
}

async fn create_news_script(
    State(state): State<AppState>,
    Json(req): Json<NewsScriptRequest>,
) -> Result<Json<ScriptResponse>, AppError> {
    state.llm.check_configured()?;

    let items =
        resolve_news_items(&state, req.news_items, &req.news_section, SCRIPT_NEWS_ITEMS).await;
    let previous = req
        .previous_greeting
        .map(|g| truncate_chars(&g, PREVIOUS_GREETING_CHARS));
    let (system, user) = prompts::news(&items, previous.as_deref());

    match state.llm.complete(&system, &user, NEWS_MAX_TOKENS).await {
        Ok(script) => Ok(Json(ScriptResponse { script })),
        Err(ScriptError::ContentFiltered) => {
            warn!("news script blocked by content filter, using headline fallback");
            Ok(Json(ScriptResponse {
                script: script::filtered_news_fallback(&items),
            }))
        }
        Err(e) => Err(e.into()),
    }
}

async fn create_news_segments(
    State(state): State<AppState>,
    Json(req): Json<NewsSegmentsRequest>,
) -> Result<Json<ScriptsResponse>, AppError> {
    state.llm.check_configured()?;

    let items = resolve_news_items(&state, req.news_items, &req.news_section, 5).await;
    if items.is_empty() {
        return Ok(Json(ScriptsResponse {
            scripts: vec!["오늘은 전해드릴 뉴스가 없습니다.".to_string()],
        }));
    }

    let expected = items.len();
    let (system, user) = prompts::news_segments(&items, req.dj_name.as_deref());
    let content = state.llm.complete(&system, &user, SEGMENTS_MAX_TOKENS).await?;

    let scripts = script::split_segments(&content, expected);
    info!(count = scripts.len(), "news segments generated");
    Ok(Json(ScriptsResponse { scripts }))
}

async fn create_closing_script(
    State(state): State<AppState>,
    Json(req): Json<ClosingScriptRequest>,
) -> Result<Json<ScriptResponse>, AppError> {
    state.llm.check_configured()?;

    let previous = req
        .previous_script
        .map(|s| truncate_chars(&s, PREVIOUS_SCRIPT_CHARS));
    let (system, user) = prompts::closing(previous.as_deref());

    let script = state.llm.complete(&system, &user, CLOSING_MAX_TOKENS).await?;
    Ok(Json(ScriptResponse { script }))
}

async fn create_full_script(
    State(state): State<AppState>,
    Json(req): Json<FullScriptRequest>,
) -> Result<Json<ScriptResponse>, AppError> {
    state.llm.check_configured()?;

    let weather_text = resolve_weather_text(&state, req.weather_text).await;
    let items =
        resolve_news_items(&state, req.news_items, &req.news_section, SCRIPT_NEWS_ITEMS).await;
    if items.is_empty() {
        warn!("no news items available, script will cover weather only");
    }
    let (system, user) = prompts::full(&weather_text, &items);

    let script = state.llm.complete(&system, &user, FULL_MAX_TOKENS).await?;
    info!(chars = script.chars().count(), "full radio script generated");
    Ok(Json(ScriptResponse { script }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::kakao::KakaoClient;
    use crate::music::{DeezerClient, YoutubeClient};
    use crate::news::NewsClient;
    use crate::odsay::OdsayClient;
    use crate::script::ChatClient;
    use crate::subway::SubwayClient;
    use crate::weather::WeatherClient;

    /// State with nothing configured; handlers that need a key must
    /// fail cleanly rather than make network calls.
    fn unconfigured_state() -> AppState {
        AppState::new(
            KakaoClient::new(None).unwrap(),
            OdsayClient::new(None).unwrap(),
            SubwayClient::new(None).unwrap(),
            WeatherClient::new().unwrap(),
            NewsClient::new(None).unwrap(),
            DeezerClient::new().unwrap(),
            YoutubeClient::new(None).unwrap(),
            ChatClient::new(
                None,
                None,
                "2024-12-01-preview".to_string(),
                "gpt-4o".to_string(),
                4096,
                0.8,
                0.95,
            )
            .unwrap(),
        )
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let app = create_router(unconfigured_state());
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn root_and_ready_answer_without_configuration() {
        let (status, body) = send(Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) =
            send(Request::get("/radio-script/ready").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn health_reports_missing_llm_config() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_llm_config");
        assert_eq!(body["llm_configured"], false);
    }

    #[tokio::test]
    async fn nav_route_rejects_blank_endpoints() {
        let (status, body) = send(
            Request::post("/nav/route")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"start": "  ", "end": "강남역"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "nav_route_error");
    }

    #[tokio::test]
    async fn nav_route_rejects_unknown_preference_codes() {
        let (status, body) = send(
            Request::post("/nav/route")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"start": "서울역", "end": "강남역", "opt": 9}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "nav_route_error");
    }

    #[tokio::test]
    async fn nav_route_without_geocoder_key_is_unavailable() {
        let (status, body) = send(
            Request::post("/nav/route")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"start": "서울역", "end": "강남역"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "geocoder_not_configured");
    }

    #[tokio::test]
    async fn autocomplete_without_key_returns_empty_results() {
        let (status, body) = send(
            Request::get("/place/autocomplete?q=%EA%B0%95%EB%82%A8")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn news_without_key_returns_empty_articles() {
        let (status, body) = send(Request::get("/news").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["articles"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn youtube_search_without_key_is_unavailable() {
        let (status, body) = send(
            Request::get("/music/search?q=iu&source=youtube")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "youtube_api_key_missing");
    }

    #[tokio::test]
    async fn music_search_rejects_unknown_sources() {
        let (status, _) = send(
            Request::get("/music/search?q=iu&source=spotify")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn script_endpoints_require_llm_configuration() {
        for path in [
            "/radio-script",
            "/radio-script/greeting",
            "/radio-script/news",
            "/radio-script/news-segments",
            "/radio-script/closing",
        ] {
            let (status, body) = send(
                Request::post(path)
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "path {path}");
            assert_eq!(body["error"], "llm_not_configured", "path {path}");
        }
    }
}
