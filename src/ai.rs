//! AI query interpreter backed by an OpenAI-compatible completion API.
//!
//! Given a free-text event query, the interpreter returns a short
//! natural-language reading of what the user is after (timing, category,
//! location signals). The interpretation is shown to the user as an
//! intermediate message only; the follow-up store search always uses the
//! raw query string, never the interpretation.

use anyhow::{Context, Result};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::AiConfig;

const SYSTEM_PROMPT: &str = "You help users find hackathons and tech events. \
Given a user's free-text query, reply with one or two short sentences \
explaining what they appear to be looking for: any timing, category, or \
location signals in the query. Do not invent events. Do not ask questions.";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the external completion service
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl QueryInterpreter {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create AI HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Interpret a free-text event query into a natural-language explanation
    /// of user intent. Exactly one completion request per call; no retries.
    pub async fn interpret(&self, query: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = json!({
            "model": self.model,
            "temperature": 0.2,
            "max_tokens": 200,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": query },
            ],
        });

        debug!(model = %self.model, query_length = query.len(), "Requesting query interpretation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("AI completion request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read AI completion response")?;

        if !status.is_success() {
            anyhow::bail!("AI completion request failed: HTTP {}: {}", status, body);
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).context("AI completion response is not valid JSON")?;

        let text = value
            .get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("AI completion response missing content"))?;

        Ok(text)
    }
}
