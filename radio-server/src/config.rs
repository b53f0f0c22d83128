//! Environment-derived settings.
//!
//! Every external provider is optional: a missing credential disables the
//! corresponding feature at request time (surfaced as a 503) rather than
//! preventing startup.

/// Application settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,

    /// Kakao Local REST key (geocoding, place autocomplete).
    pub kakao_rest_key: Option<String>,

    /// ODsay API key (multi-modal transit routing).
    pub odsay_api_key: Option<String>,

    /// Seoul open-data key for the realtime subway arrivals feed.
    pub seoul_subway_api_key: Option<String>,

    /// DeepSearch domestic news API key.
    pub deepsearch_news_api_key: Option<String>,

    /// YouTube Data API key (music video search).
    pub youtube_api_key: Option<String>,

    /// Azure OpenAI endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub azure_openai_endpoint: Option<String>,

    /// Azure OpenAI API key.
    pub azure_openai_api_key: Option<String>,

    /// Azure OpenAI API version query parameter.
    pub azure_openai_api_version: String,

    /// Chat model deployment name.
    pub model_name: String,

    /// Upper bound on completion tokens; per-script limits are capped by this.
    pub max_tokens: u32,

    /// Sampling temperature for script generation.
    pub temperature: f32,

    /// Nucleus sampling parameter for script generation.
    pub top_p: f32,
}

impl Config {
    /// Read settings from the environment. Missing or empty variables
    /// become `None`; malformed numeric variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            port: var("APP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(9100),
            kakao_rest_key: var("KAKAO_REST_KEY"),
            odsay_api_key: var("ODSAY_API_KEY"),
            seoul_subway_api_key: var("SEOUL_SUBWAY_API_KEY"),
            deepsearch_news_api_key: var("DEEPSEARCH_NEWS_API_KEY"),
            youtube_api_key: var("YOUTUBE_API_KEY"),
            azure_openai_endpoint: var("AZURE_OPENAI_ENDPOINT"),
            azure_openai_api_key: var("AZURE_OPENAI_API_KEY"),
            azure_openai_api_version: var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| "2024-12-01-preview".to_string()),
            model_name: var("MODEL_NAME").unwrap_or_else(|| "gpt-4o".to_string()),
            max_tokens: var("MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(4096),
            temperature: var("TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.8),
            top_p: var("TOP_P").and_then(|v| v.parse().ok()).unwrap_or(0.95),
        }
    }
}

/// Read an environment variable, treating an empty or whitespace-only
/// value the same as an unset one.
fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
