//! Routing provider error types.

/// Errors from the transit routing provider.
#[derive(Debug, thiserror::Error)]
pub enum OdsayError {
    /// No API key configured
    #[error("transit routing is not configured (ODSAY_API_KEY missing)")]
    NotConfigured,

    /// Provider returned no path between the endpoints
    #[error("no transit route found")]
    NoRoute,

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the provider response
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
