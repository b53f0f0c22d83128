//! Chat-completion client (Azure OpenAI).

use serde_json::{Value, json};

use super::error::ScriptError;

/// Total request timeout in seconds. Completions are slow.
const TIMEOUT_SECS: u64 = 60;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Client for the chat-completions API. Unconfigured when either the
/// endpoint or the key is missing.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
    api_version: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl ChatClient {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        api_version: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        top_p: f32,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            api_key,
            api_version,
            model,
            max_tokens,
            temperature,
            top_p,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }

    pub fn check_configured(&self) -> Result<(), ScriptError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ScriptError::NotConfigured)
        }
    }

    /// Run one system+user completion and return the trimmed content.
    /// `max_tokens` is capped by the configured ceiling.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, ScriptError> {
        let (Some(endpoint), Some(key)) = (self.endpoint.as_deref(), self.api_key.as_deref())
        else {
            return Err(ScriptError::NotConfigured);
        };

        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            endpoint.trim_end_matches('/'),
            self.model,
            self.api_version
        );

        let response = self
            .http
            .post(url)
            .header("api-key", key)
            .json(&json!({
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": user},
                ],
                "max_tokens": max_tokens.min(self.max_tokens),
                "temperature": self.temperature,
                "top_p": self.top_p,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let lowered = body.to_lowercase();
            if lowered.contains("content_filter") || lowered.contains("filtered") {
                return Err(ScriptError::ContentFiltered);
            }
            return Err(ScriptError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body: Value = response.json().await.map_err(|e| ScriptError::Json {
            message: e.to_string(),
        })?;

        let content = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| ScriptError::Json {
                message: "completion response had no message content".to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}
