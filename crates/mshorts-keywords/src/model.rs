//! Model-backed keyword extraction via a local language-model endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use mshorts_models::KeywordSet;

use crate::pattern::PatternExtractor;
use crate::KeywordExtractor;

/// Default model name on the local endpoint.
pub const DEFAULT_KEYWORD_MODEL: &str = "qwen2.5:3b";

/// Probe and generation timeouts.
const PROBE_TIMEOUT_SECS: u64 = 2;
const GENERATE_TIMEOUT_SECS: u64 = 30;

/// Extracts content words (nouns and adjectives as lowercase lemmas) by
/// prompting an Ollama-compatible endpoint. Errors are reported to the
/// engine, which degrades to the pattern strategy.
pub struct ModelExtractor {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct KeywordPayload {
    #[serde(default)]
    keywords: Vec<String>,
}

impl ModelExtractor {
    /// Create an extractor against the given endpoint base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: DEFAULT_KEYWORD_MODEL.to_string(),
        }
    }

    /// One-time startup capability check: is the model endpoint reachable?
    pub async fn probe(base_url: &str) -> bool {
        let client = reqwest::Client::new();
        let url = format!("{}/api/tags", base_url);
        match client
            .get(&url)
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Keyword model endpoint not reachable");
                false
            }
        }
    }

    /// Ask the model for keywords. Any transport, HTTP, or parse problem is
    /// an error the engine turns into a fallback.
    pub async fn try_extract(&self, text: &str) -> Result<KeywordSet, String> {
        let prompt = format!(
            "Extract the content words (nouns and adjectives) from this text \
             as lowercase lemmas, suitable as stock-video search terms. \
             Return ONLY a JSON object like {{\"keywords\": [\"word\", ...]}}.\n\nText:\n{}",
            text
        );

        let request = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "format": "json",
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        let body: GenerateResponse = response.json().await.map_err(|e| e.to_string())?;
        let payload: KeywordPayload =
            serde_json::from_str(&body.response).map_err(|e| e.to_string())?;

        Ok(KeywordSet::from_words(payload.keywords))
    }
}

#[async_trait]
impl KeywordExtractor for ModelExtractor {
    async fn extract(&self, text: &str) -> KeywordSet {
        match self.try_extract(text).await {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "Model extraction failed, using pattern fallback");
                PatternExtractor::new().extract_sync(text)
            }
        }
    }

    fn name(&self) -> &'static str {
        "model"
    }
}
