//! Arrivals feed error types.

/// Errors from the realtime arrivals feed.
///
/// These are always swallowed to an empty arrival list by the client;
/// they exist so the failure reason can be logged.
#[derive(Debug, thiserror::Error)]
pub enum SubwayError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned a non-success status code
    #[error("feed error {status}")]
    Api { status: u16 },

    /// Feed payload was not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}
