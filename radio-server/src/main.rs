use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use radio_server::config::Config;
use radio_server::kakao::KakaoClient;
use radio_server::music::{DeezerClient, YoutubeClient};
use radio_server::news::NewsClient;
use radio_server::odsay::OdsayClient;
use radio_server::script::ChatClient;
use radio_server::subway::SubwayClient;
use radio_server::weather::WeatherClient;
use radio_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    // Missing keys disable features at request time rather than
    // preventing startup; say so up front.
    for (key, name) in [
        (&config.kakao_rest_key, "KAKAO_REST_KEY"),
        (&config.odsay_api_key, "ODSAY_API_KEY"),
        (&config.seoul_subway_api_key, "SEOUL_SUBWAY_API_KEY"),
        (&config.deepsearch_news_api_key, "DEEPSEARCH_NEWS_API_KEY"),
        (&config.youtube_api_key, "YOUTUBE_API_KEY"),
        (&config.azure_openai_endpoint, "AZURE_OPENAI_ENDPOINT"),
        (&config.azure_openai_api_key, "AZURE_OPENAI_API_KEY"),
    ] {
        if key.is_none() {
            warn!("{name} not set; the dependent endpoints will return 503 or empty results");
        }
    }

    let kakao = KakaoClient::new(config.kakao_rest_key.clone())
        .expect("failed to create place-search client");
    let odsay =
        OdsayClient::new(config.odsay_api_key.clone()).expect("failed to create routing client");
    let subway = SubwayClient::new(config.seoul_subway_api_key.clone())
        .expect("failed to create subway arrivals client");
    let weather = WeatherClient::new().expect("failed to create weather client");
    let news = NewsClient::new(config.deepsearch_news_api_key.clone())
        .expect("failed to create news client");
    let deezer = DeezerClient::new().expect("failed to create music chart client");
    let youtube = YoutubeClient::new(config.youtube_api_key.clone())
        .expect("failed to create music search client");
    let llm = ChatClient::new(
        config.azure_openai_endpoint.clone(),
        config.azure_openai_api_key.clone(),
        config.azure_openai_api_version.clone(),
        config.model_name.clone(),
        config.max_tokens,
        config.temperature,
        config.top_p,
    )
    .expect("failed to create chat-completion client");

    let state = AppState::new(kakao, odsay, subway, weather, news, deezer, youtube, llm);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("radio-server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
