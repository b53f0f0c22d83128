//! Script generation error types.

/// Errors from the script generator.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// No LLM endpoint or key configured
    #[error("script generation is not configured (AZURE_OPENAI_ENDPOINT / AZURE_OPENAI_API_KEY missing)")]
    NotConfigured,

    /// The completion was blocked by the provider's content filter
    #[error("completion blocked by content filter")]
    ContentFiltered,

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the completion API
    #[error("completion API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the completion response
    #[error("response parse error: {message}")]
    Json { message: String },
}
