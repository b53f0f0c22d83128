//! Radio-DJ script generation.
//!
//! Builds Korean prompts from the day's weather and news and runs them
//! through a chat-completion model. Segment output uses a `---NEXT---`
//! delimiter so one completion can drive several on-air breaks.

mod error;
mod llm;
pub mod prompts;

use serde::Deserialize;

pub use error::ScriptError;
pub use llm::ChatClient;

/// Delimiter between segments in a multi-segment completion.
pub const SEGMENT_DELIMITER: &str = "---NEXT---";

/// Per-script-kind completion token caps.
pub const GREETING_MAX_TOKENS: u32 = 800;
pub const NEWS_MAX_TOKENS: u32 = 1500;
pub const SEGMENTS_MAX_TOKENS: u32 = 1200;
pub const CLOSING_MAX_TOKENS: u32 = 500;
pub const FULL_MAX_TOKENS: u32 = 2048;

/// One news item fed into a prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// Truncate a string to at most `n` characters (not bytes; the text is
/// mostly Korean).
pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Split a segmented completion into exactly `expected` scripts.
///
/// A model that emits too few segments gets padded with a generic
/// sign-off; one that emits none at all falls back to a one-line
/// summary per segment.
pub fn split_segments(content: &str, expected: usize) -> Vec<String> {
    let parts: Vec<String> = content
        .split(SEGMENT_DELIMITER)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if parts.len() >= expected {
        parts.into_iter().take(expected).collect()
    } else if !parts.is_empty() {
        let missing = expected - parts.len();
        parts
            .into_iter()
            .chain(std::iter::repeat_n(
                "이상 오늘의 뉴스였습니다.".to_string(),
                missing,
            ))
            .collect()
    } else {
        vec!["오늘의 뉴스를 간단히 전해드렸습니다.".to_string(); expected]
    }
}

/// Plain headline run-through used when the content filter blocks the
/// generated news script.
pub fn filtered_news_fallback(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return "오늘은 특별한 뉴스가 없네요. 여러분의 하루 속에서 좋은 소식들이 가득하길 바랍니다."
            .to_string();
    }

    let headlines = items
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, item)| format!("뉴스 {}: {}", i + 1, truncate_chars(&item.title, 100)))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "오늘의 주요 뉴스를 간단히 전해드리겠습니다.\n\n{headlines}\n\n이상 오늘의 뉴스였습니다."
    )
}
