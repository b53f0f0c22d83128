//! Place-search error types.

/// Errors from the place-search provider.
#[derive(Debug, thiserror::Error)]
pub enum KakaoError {
    /// No REST key configured
    #[error("place search is not configured (KAKAO_REST_KEY missing)")]
    NotConfigured,

    /// Neither endpoint returned a result for the query
    #[error("no coordinate found for \"{0}\"")]
    NoResult(String),

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse the provider response
    #[error("response parse error: {message}")]
    Json { message: String },
}
