//! Client for the Gemini `generateContent` API.

mod errors;

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::errors::GuildbotError;
use errors::check_response;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 120;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

// Generation settings for chat replies.
const MAX_OUTPUT_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: BASE_URL.to_string(),
            client: Client::builder()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    #[cfg(test)]
    fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            base_url,
            ..Self::new(api_key, model)
        }
    }

    /// Submit one prompt and return the model's text reply, trimmed.
    pub async fn generate(&self, prompt: &str) -> Result<String, GuildbotError> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "temperature": TEMPERATURE,
                "topP": TOP_P,
            },
        });

        // The key rides in the query string, so the URL itself must never be logged.
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!("requesting completion from {}", self.model);
        let resp = self.client.post(&url).json(&payload).send().await?;
        let body = check_response(resp).await?;
        Self::parse_text(&body)
    }

    fn parse_text(body: &Value) -> Result<String, GuildbotError> {
        body["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|candidate| candidate["content"]["parts"].as_array())
            .and_then(|parts| parts.iter().find_map(|p| p["text"].as_str()))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string)
            .ok_or(GuildbotError::EmptyResponse)
    }

    /// Cheap connectivity check for the `/status` command. Failures are
    /// reported as `false`, never propagated.
    pub async fn probe(&self) -> bool {
        match self
            .generate("Connection test. Reply with the single word OK.")
            .await
        {
            Ok(text) => text.to_uppercase().contains("OK"),
            Err(e) => {
                warn!("Gemini connection test failed: {}", e);
                false
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
