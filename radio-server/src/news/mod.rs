//! News provider (DeepSearch article API).
//!
//! Fetches today's domestic articles for one or more sections. The
//! upstream schema has drifted over time, so articles are normalized
//! from loose JSON: several candidate keys are tried for each field and
//! rows without both a title and a URL are dropped. A day with no
//! articles yet (early morning) retries with yesterday included.
//!
//! Lookups never fail the caller: a missing key or upstream problem
//! yields an empty list, logged at warn level.

use chrono::{Duration, Local};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Default base URL for the article API.
const DEFAULT_BASE_URL: &str = "https://api-v2.deepsearch.com";

/// Section list used when the caller asks for "all".
const ALL_SECTIONS: &str = "economy,society,politics,tech,culture,world,entertainment,opinion";

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 15;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// One normalized article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub published_at: Option<String>,
    pub source: String,
    pub summary: String,
}

/// Client for the article API.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsClient {
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

    /// Fetch today's articles for a section ("all" or a comma list of
    /// section names). Returns an empty list on any failure.
    pub async fn fetch(&self, section: &str, page_size: usize) -> Vec<Article> {
        let Some(key) = self.api_key.as_deref() else {
            warn!("news API key missing, returning no articles");
            return Vec::new();
        };

        let sections = match section.trim() {
            "" | "all" => ALL_SECTIONS,
            other => other,
        };

        let today = Local::now().format("%Y-%m-%d").to_string();
        let yesterday = (Local::now() - Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();

        match self.fetch_window(key, sections, &today, &today, page_size).await {
            Ok(articles) if !articles.is_empty() => articles,
            Ok(_) => {
                // Nothing published yet today; widen to yesterday.
                match self
                    .fetch_window(key, sections, &yesterday, &today, page_size)
                    .await
                {
                    Ok(articles) => articles,
                    Err(e) => {
                        warn!(section, error = %e, "news fetch failed (yesterday window)");
                        Vec::new()
                    }
                }
            }
            Err(e) => {
                warn!(section, error = %e, "news fetch failed");
                Vec::new()
            }
        }
    }

    /// Fetch a handful of articles from each named section, in order.
    pub async fn fetch_per_sections(
        &self,
        sections: &[String],
        per_section: usize,
    ) -> Vec<Article> {
        if sections.is_empty() {
            return self.fetch("all", 3).await;
        }

        let mut out = Vec::new();
        for section in sections {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }
            let mut items = self.fetch(section, per_section).await;
            items.truncate(per_section);
            out.extend(items);
        }
        out
    }

    async fn fetch_window(
        &self,
        key: &str,
        sections: &str,
        date_from: &str,
        date_to: &str,
        page_size: usize,
    ) -> Result<Vec<Article>, reqwest::Error> {
        let response = self
            .http
            .get(format!("{}/v1/articles/{sections}", self.base_url))
            .query(&[
                ("date_from", date_from.to_string()),
                ("date_to", date_to.to_string()),
                ("page", "1".to_string()),
                ("page_size", page_size.to_string()),
                ("api_key", key.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, sections, "news API returned an error status");
            return Ok(Vec::new());
        }

        let body: Value = response.json().await?;
        let rows = body
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(rows.iter().filter_map(normalize_article).collect())
    }
}

/// Normalize one raw article row. Returns `None` when the row lacks a
/// title or a URL.
pub fn normalize_article(raw: &Value) -> Option<Article> {
    let title = first_str(raw, &["title", "subject", "headline"])
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let url = first_str(raw, &["content_url", "url", "link", "article_url", "web_url"])
        .unwrap_or_default()
        .to_string();

    if title.is_empty() || url.is_empty() {
        return None;
    }

    let source = first_str(raw, &["publisher", "author"])
        .or_else(|| {
            raw.get("source")
                .and_then(|s| first_str(s, &["name", "name_kr"]))
        })
        .or_else(|| first_str(raw, &["source_name"]))
        .unwrap_or_default()
        .to_string();

    Some(Article {
        title,
        url,
        published_at: first_str(raw, &["published_at", "publishedAt", "date", "created_at"])
            .map(str::to_string),
        source,
        summary: first_str(raw, &["summary"])
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    })
}

fn first_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| value.get(k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}
