//! Text-to-speech client.
//!
//! Detects the language of the input text from its script (any non-ASCII
//! codepoint selects Arabic) and fetches synthesized audio from a
//! gTTS-compatible HTTP endpoint, streaming the bytes to a target path.
//! Synthesis failure is pipeline-fatal; there is no retry or fallback voice.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use mshorts_models::Language;

/// Default synthesis endpoint (gTTS-compatible).
pub const DEFAULT_SPEECH_BASE_URL: &str = "https://translate.google.com/translate_tts";

/// Per-request timeout in seconds.
pub const SPEECH_TIMEOUT_SECS: u64 = 15;

/// Normal speech speed parameter.
const SPEED_NORMAL: &str = "1";
/// Slow speech speed parameter.
const SPEED_SLOW: &str = "0.24";

/// Result type for speech synthesis.
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Errors that can occur during speech synthesis.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Synthesis request failed: {0}")]
    Transport(String),

    #[error("Synthesis service returned empty audio")]
    EmptyAudio,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client for the text-to-speech service.
pub struct SpeechClient {
    client: reqwest::Client,
    base_url: String,
}

impl SpeechClient {
    /// Create a client against the given synthesis endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Detect the language of `text` and synthesize it to `output_path`.
    ///
    /// Returns the detected language tag that was sent to the service.
    pub async fn synthesize(
        &self,
        text: &str,
        output_path: impl AsRef<Path>,
    ) -> SpeechResult<Language> {
        let language = Language::detect(text);
        self.synthesize_with(text, language, false, output_path).await?;
        Ok(language)
    }

    /// Synthesize `text` with an explicit language tag and speed flag.
    pub async fn synthesize_with(
        &self,
        text: &str,
        language: Language,
        slow: bool,
        output_path: impl AsRef<Path>,
    ) -> SpeechResult<()> {
        let output_path = output_path.as_ref();
        let speed = if slow { SPEED_SLOW } else { SPEED_NORMAL };

        debug!(language = %language, slow = slow, "Requesting speech synthesis");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("q", text.trim()),
                ("tl", language.tag()),
                ("ttsspeed", speed),
            ])
            .timeout(Duration::from_secs(SPEECH_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| SpeechError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SpeechError::Transport(e.to_string()))?;

        let mut file = File::create(output_path).await?;
        let mut response = response;
        let mut written: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SpeechError::Transport(e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        if written == 0 {
            return Err(SpeechError::EmptyAudio);
        }

        info!(
            output = %output_path.display(),
            language = %language,
            size_kb = written / 1024,
            "Synthesized speech"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_synthesize_detects_english_and_writes_audio() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("tl", "en"))
            .and(query_param("ttsspeed", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3 bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("speech.mp3");
        let client = SpeechClient::new(server.uri());

        let language = client
            .synthesize("Wake up. The best version of you is waiting.", &dest)
            .await
            .unwrap();

        assert_eq!(language, Language::En);
        assert_eq!(std::fs::read(&dest).unwrap(), b"mp3 bytes");
    }

    #[tokio::test]
    async fn test_synthesize_detects_arabic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("tl", "ar"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("speech.mp3");
        let client = SpeechClient::new(server.uri());

        let language = client.synthesize("استيقظ الآن", &dest).await.unwrap();
        assert_eq!(language, Language::Ar);
    }

    #[tokio::test]
    async fn test_http_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("speech.mp3");
        let client = SpeechClient::new(server.uri());

        let err = client.synthesize("hello world", &dest).await.unwrap_err();
        assert!(matches!(err, SpeechError::Transport(_)));
    }

    #[tokio::test]
    async fn test_empty_audio_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(Vec::new()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("speech.mp3");
        let client = SpeechClient::new(server.uri());

        let err = client.synthesize("hello world", &dest).await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyAudio));
    }
}
