//! Music provider error types.

/// Errors from the music providers.
#[derive(Debug, thiserror::Error)]
pub enum MusicError {
    /// No API key configured
    #[error("music search is not configured (YOUTUBE_API_KEY missing)")]
    NotConfigured,

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the provider
    #[error("music API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the provider response
    #[error("response parse error: {message}")]
    Json { message: String },
}
